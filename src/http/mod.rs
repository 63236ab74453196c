//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, catch-all handler)
//!     → request.rs (buffer body, build InboundEvent, request ID)
//!     → routing::Dispatcher (resolve + dispatch)
//!     → response.rs (render normalized response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::RequestUuid;
pub use server::HttpServer;
