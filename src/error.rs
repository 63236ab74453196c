//! Error taxonomy for the router.
//!
//! # Design Decisions
//! - One variant per failure domain; each is converted to a response at the
//!   dispatcher boundary, none escape `resolve`
//! - Route-not-found is an expected outcome, not an operational error
//! - Transport and invocation details are logged at their origin and never
//!   surfaced to the caller

use thiserror::Error;

use crate::forward::ForwardError;
use crate::invoke::InvokeError;
use crate::routing::DescriptorError;
use crate::store::StoreError;

/// Everything that can go wrong between receiving an event and producing
/// a dispatch outcome.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Connection or query failure against the route store.
    #[error("route store unavailable: {0}")]
    Store(#[from] StoreError),

    /// No descriptor stored for the path (absent key or explicit null).
    #[error("no route configured for path: {0}")]
    NotFound(String),

    /// Stored value failed to parse or names no recognized destination.
    #[error("malformed route descriptor: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Outbound HTTP call failed at the transport layer.
    #[error("upstream forward failed: {0}")]
    Forward(#[from] ForwardError),

    /// Remote function call or payload parse failed.
    #[error("function invocation failed: {0}")]
    Invocation(#[from] InvokeError),
}

impl RouterError {
    /// Status code this failure surfaces as.
    pub fn status(&self) -> u16 {
        match self {
            RouterError::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// Label used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            RouterError::Store(_) => "store-error",
            RouterError::NotFound(_) => "not-found",
            RouterError::Descriptor(_) => "bad-descriptor",
            RouterError::Forward(_) => "forward-error",
            RouterError::Invocation(_) => "invoke-error",
        }
    }
}
