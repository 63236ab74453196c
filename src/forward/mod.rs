//! Upstream HTTP forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! InboundEvent + target URL
//!     → url.rs (merge query, sanitize headers, rebuild body)
//!     → outbound HTTPS request (bounded by the forward timeout)
//!     → buffered upstream status/body/headers as one DispatchOutcome
//! ```
//!
//! # Design Decisions
//! - Upstream statuses propagate verbatim, error statuses included
//! - Transport failures never reach the caller as-is; the dispatcher turns
//!   them into a generic 500
//! - Responses are fully buffered; no streaming passthrough

pub mod url;

pub use self::url::UrlForwarder;

use std::time::Duration;

use thiserror::Error;

/// Transport-level forwarding failure.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid target url `{0}`")]
    BadTarget(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to read upstream body: {0}")]
    Body(String),
}
