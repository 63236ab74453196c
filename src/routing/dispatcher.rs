//! The decision core: resolve a path to a destination and dispatch to it.
//!
//! # Responsibilities
//! - Look up the stored descriptor for the event's raw path
//! - Classify it into literal reply, upstream forward, or function call
//! - Collapse every failure into a well-formed HTTP response
//!
//! # Design Decisions
//! - `resolve` never fails; callers always get a concrete status code
//! - Failures are logged at the boundary closest to their origin: the store
//!   error and malformed descriptors here (with event context), transport
//!   errors inside the forwarder and invoker
//! - Not-found is logged at debug only; it is an expected outcome

use std::sync::Arc;
use std::time::Instant;

use crate::error::RouterError;
use crate::event::{HttpResponse, InboundEvent};
use crate::forward::UrlForwarder;
use crate::invoke::FunctionInvoker;
use crate::observability::metrics;
use crate::routing::descriptor::{self, RouteDescriptor};
use crate::routing::outcome::DispatchOutcome;
use crate::store::RouteStore;

/// Resolves inbound events against the route store and dispatches them.
pub struct Dispatcher {
    store: Arc<dyn RouteStore>,
    forwarder: UrlForwarder,
    invoker: Arc<dyn FunctionInvoker>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn RouteStore>,
        forwarder: UrlForwarder,
        invoker: Arc<dyn FunctionInvoker>,
    ) -> Self {
        Self {
            store,
            forwarder,
            invoker,
        }
    }

    /// Resolve one inbound event to a final response.
    ///
    /// Total: store failures, malformed descriptors, and dispatch errors all
    /// come back as responses, never as panics or propagated errors.
    pub async fn resolve(&self, event: &InboundEvent) -> HttpResponse {
        let start = Instant::now();
        let (label, response) = match self.dispatch(event).await {
            Ok((descriptor_label, outcome)) => (descriptor_label, outcome.into_response()),
            Err(err) => (err.label(), self.failure_response(&err, event)),
        };
        metrics::record_dispatch(label, response.status_code, start);
        response
    }

    async fn dispatch(
        &self,
        event: &InboundEvent,
    ) -> Result<(&'static str, DispatchOutcome), RouterError> {
        let key = event.raw_path.as_str();

        let raw = self
            .store
            .get(key)
            .await?
            .ok_or_else(|| RouterError::NotFound(key.to_string()))?;

        let descriptor = match descriptor::parse(&raw) {
            Ok(Some(descriptor)) => descriptor,
            Ok(None) => return Err(RouterError::NotFound(key.to_string())),
            Err(err) => {
                tracing::error!(
                    path = %key,
                    stored = %String::from_utf8_lossy(&raw),
                    event = ?event,
                    error = %err,
                    "Stored route descriptor is unusable"
                );
                return Err(RouterError::Descriptor(err));
            }
        };

        tracing::debug!(path = %key, kind = descriptor.label(), "Route resolved");

        let label = descriptor.label();
        let outcome = match descriptor {
            RouteDescriptor::Literal(text) => {
                DispatchOutcome::new(200, text).with_header("Content-Type", "text/plain")
            }
            RouteDescriptor::Url(target) => self.forwarder.forward(event, &target).await?,
            RouteDescriptor::Function(function_id) => {
                self.invoker.invoke(event, &function_id).await?
            }
        };
        Ok((label, outcome))
    }

    fn failure_response(&self, err: &RouterError, event: &InboundEvent) -> HttpResponse {
        let body = match err {
            RouterError::NotFound(path) => {
                tracing::debug!(path = %path, "No route configured");
                format!("no route configured for path: {path}")
            }
            RouterError::Store(store_err) => {
                tracing::error!(
                    error = %store_err,
                    event = ?event,
                    "Route store lookup failed"
                );
                "router error".to_string()
            }
            // Already logged with the stored value at the parse site.
            RouterError::Descriptor(_) => "router error".to_string(),
            // Already logged with target / function identifier at the origin.
            RouterError::Forward(_) | RouterError::Invocation(_) => {
                "Error forwarding request".to_string()
            }
        };
        DispatchOutcome::new(err.status(), body).into_response()
    }
}
