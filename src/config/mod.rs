//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → env.rs (map variables onto the schema)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → shared with subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Configuration is immutable once loaded
//! - Only the store settings are required; everything else has defaults
//! - Missing store host/port/credential/table is a fatal startup condition
//! - Validation separates syntactic (parsing) from semantic checks

pub mod env;
pub mod schema;
pub mod validation;

pub use env::ConfigError;
pub use schema::{
    CredentialPolicy, InvokerConfig, ListenerConfig, ObservabilityConfig, RouterConfig,
    StoreConfig, TimeoutConfig,
};
