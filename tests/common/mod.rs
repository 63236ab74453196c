//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::any;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use edge_router::event::InboundEvent;
use edge_router::forward::UrlForwarder;
use edge_router::invoke::{FunctionInvoker, InvokeError};
use edge_router::routing::{DispatchOutcome, Dispatcher};
use edge_router::store::MemoryRouteStore;

/// Everything an echo upstream saw for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoReport {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub body: String,
}

async fn echo_handler(request: Request<Body>) -> Json<EchoReport> {
    let (parts, body) = request.into_parts();

    let query = parts
        .uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect::<HashMap<String, String>>()
        })
        .unwrap_or_default();
    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|text| (name.as_str().to_string(), text.to_string()))
        })
        .collect();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    Json(EchoReport {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        headers,
        query,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start an upstream that reports everything it receives as JSON.
pub async fn start_echo_upstream() -> SocketAddr {
    serve(
        Router::new()
            .route("/", any(echo_handler))
            .route("/{*path}", any(echo_handler)),
    )
    .await
}

/// Start an upstream that always answers with a fixed status and body.
#[allow(dead_code)]
pub async fn start_status_upstream(status: u16, body: &'static str) -> SocketAddr {
    serve(Router::new().fallback(move || async move {
        (StatusCode::from_u16(status).unwrap(), [("x-upstream", "yes")], body)
    }))
    .await
}

/// Start an upstream that answers only after `delay`.
#[allow(dead_code)]
pub async fn start_slow_upstream(delay: Duration) -> SocketAddr {
    serve(Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        (StatusCode::OK, "late")
    }))
    .await
}

/// One call seen by the recording invoker.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedInvocation {
    pub function_id: String,
    pub payload: Option<String>,
}

/// Invoker double that records calls and echoes the payload back as the body.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingInvoker {
    pub calls: Mutex<Vec<RecordedInvocation>>,
}

#[async_trait]
impl FunctionInvoker for RecordingInvoker {
    async fn invoke(
        &self,
        event: &InboundEvent,
        function_id: &str,
    ) -> Result<DispatchOutcome, InvokeError> {
        let payload = event.body.as_ref().map(|b| b.to_wire());
        self.calls.lock().unwrap().push(RecordedInvocation {
            function_id: function_id.to_string(),
            payload: payload.clone(),
        });
        Ok(DispatchOutcome::new(200, payload.unwrap_or_default()))
    }
}

/// Invoker double that always fails.
#[allow(dead_code)]
pub struct FailingInvoker;

#[async_trait]
impl FunctionInvoker for FailingInvoker {
    async fn invoke(
        &self,
        _event: &InboundEvent,
        _function_id: &str,
    ) -> Result<DispatchOutcome, InvokeError> {
        Err(InvokeError::Transport("injected failure".into()))
    }
}

/// Forwarder with short test-friendly timeouts.
pub fn test_forwarder() -> UrlForwarder {
    UrlForwarder::new(Duration::from_secs(5), Duration::from_secs(2)).unwrap()
}

/// Dispatcher over an in-memory store and the given invoker.
#[allow(dead_code)]
pub fn dispatcher_with(
    store: Arc<MemoryRouteStore>,
    invoker: Arc<dyn FunctionInvoker>,
) -> Dispatcher {
    Dispatcher::new(store, test_forwarder(), invoker)
}
