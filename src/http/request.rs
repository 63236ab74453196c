//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID for tracing
//! - Convert an incoming HTTP request into an `InboundEvent`
//!
//! # Design Decisions
//! - Request ID added as early as possible and propagated to the response
//! - The body is buffered up front; the router never streams
//! - Body bytes stay text; they are never re-encoded on the way in

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::event::{EventBody, InboundEvent};

/// UUID v4 request IDs for the `x-request-id` header.
#[derive(Clone, Copy, Default)]
pub struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Convert an incoming request into the router's event shape.
///
/// Fails only when the body cannot be read (oversized or interrupted).
pub async fn extract_event(
    request: Request<Body>,
    max_body_bytes: usize,
) -> Result<InboundEvent, String> {
    let (parts, body) = request.into_parts();

    let raw_path = parts.uri.path().to_string();
    let query_string_parameters = parts.uri.query().map(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect::<HashMap<String, String>>()
    });

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

    let bytes = axum::body::to_bytes(body, max_body_bytes)
        .await
        .map_err(|err| err.to_string())?;
    let body = if bytes.is_empty() {
        None
    } else {
        Some(EventBody::Text(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };

    Ok(InboundEvent {
        http_method: Some(parts.method.to_string()),
        raw_path,
        headers,
        query_string_parameters,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extracts_method_path_query_and_headers() {
        let request = Request::builder()
            .method("GET")
            .uri("http://router.internal/orders?id=AKID&key=SECRET")
            .header("host", "router.internal")
            .header("accept", "application/json")
            .body(Body::empty())
            .unwrap();

        let event = extract_event(request, 1024).await.unwrap();
        assert_eq!(event.http_method.as_deref(), Some("GET"));
        assert_eq!(event.raw_path, "/orders");
        let query = event.query_string_parameters.unwrap();
        assert_eq!(query.get("id").unwrap(), "AKID");
        assert_eq!(query.get("key").unwrap(), "SECRET");
        assert_eq!(event.headers.get("host").unwrap(), "router.internal");
        assert!(event.body.is_none());
    }

    #[tokio::test]
    async fn test_body_is_kept_as_text() {
        let request = Request::builder()
            .method("POST")
            .uri("/submit")
            .body(Body::from(r#"{"b":2,"a":1}"#))
            .unwrap();

        let event = extract_event(request, 1024).await.unwrap();
        // Byte-for-byte: no JSON round-trip that could reorder keys.
        assert_eq!(event.body, Some(EventBody::Text(r#"{"b":2,"a":1}"#.into())));
    }

    #[tokio::test]
    async fn test_no_query_string_is_none() {
        let request = Request::builder()
            .uri("/plain")
            .body(Body::empty())
            .unwrap();
        let event = extract_event(request, 1024).await.unwrap();
        assert!(event.query_string_parameters.is_none());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let request = Request::builder()
            .uri("/big")
            .body(Body::from(vec![b'x'; 64]))
            .unwrap();
        assert!(extract_event(request, 8).await.is_err());
    }
}
