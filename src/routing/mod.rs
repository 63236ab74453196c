//! Route resolution and dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! InboundEvent
//!     → dispatcher.rs (store lookup by raw path)
//!     → descriptor.rs (parse stored value, classify destination)
//!     → literal reply | forward/ | invoke/
//!     → outcome.rs (normalize into the final HttpResponse)
//! ```
//!
//! # Design Decisions
//! - Destination kinds are a closed sum type with an exhaustive match;
//!   unrecognized kinds are a distinct error, never a silent default
//! - `resolve` is total: every failure collapses to a well-formed response
//! - Missing route and stored null are the same non-error outcome (404)

pub mod descriptor;
pub mod dispatcher;
pub mod outcome;

pub use descriptor::{DescriptorError, RouteDescriptor};
pub use dispatcher::Dispatcher;
pub use outcome::DispatchOutcome;
