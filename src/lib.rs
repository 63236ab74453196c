//! Serverless HTTP edge router library.
//!
//! An inbound HTTP-like event is resolved against a key-value route store.
//! The stored descriptor sends it to exactly one of three destinations (an
//! inline literal response, a proxied HTTP(S) call, or a synchronous remote
//! function invocation) and the result is normalized into an HTTP response.

// Core subsystems
pub mod config;
pub mod event;
pub mod forward;
pub mod http;
pub mod invoke;
pub mod routing;
pub mod store;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::RouterConfig;
pub use error::RouterError;
pub use event::{EventBody, HttpResponse, InboundEvent};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::Dispatcher;
