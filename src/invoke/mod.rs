//! Remote function invocation subsystem.
//!
//! # Data Flow
//! ```text
//! InboundEvent + function identifier
//!     → credentials per the configured policy (caller query params | ambient)
//!     → synchronous invocation, inbound body passed verbatim as payload
//!     → returned payload parsed and shaped into a DispatchOutcome
//! ```
//!
//! # Design Decisions
//! - Invocation is always synchronous; the dispatcher blocks for the result
//! - Errors carry detail for the log only; callers see a generic 500
//! - Caller-supplied credentials are an explicit policy choice, not an
//!   implicit default inherited silently

pub mod lambda;

pub use lambda::LambdaInvoker;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::event::InboundEvent;
use crate::routing::DispatchOutcome;

/// Failure invoking the remote function or handling its payload.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("missing `id`/`key` invocation credentials in query parameters")]
    MissingCredentials,

    #[error("invocation transport failure: {0}")]
    Transport(String),

    #[error("invocation timed out after {0:?}")]
    Timeout(Duration),

    #[error("function reported error: {0}")]
    Function(String),

    #[error("function payload was not valid JSON: {0}")]
    Payload(String),
}

/// Capability to invoke a remote function synchronously.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    /// Invoke `function_id` with the event's body as payload and block for
    /// the shaped result.
    async fn invoke(
        &self,
        event: &InboundEvent,
        function_id: &str,
    ) -> Result<DispatchOutcome, InvokeError>;
}
