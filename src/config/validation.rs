//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (env.rs handles syntactic)
//! - Check value ranges (timeouts > 0, ports valid, addresses parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the assembled config
//! - Runs before the config is accepted into the system

use thiserror::Error;

use crate::config::schema::RouterConfig;

/// One semantic problem with an assembled configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("store {0} must not be empty")]
    EmptyStoreField(&'static str),

    #[error("store port must not be zero")]
    ZeroStorePort,

    #[error("bind address `{0}` is not a valid socket address")]
    BadBindAddress(String),

    #[error("metrics address `{0}` is not a valid socket address")]
    BadMetricsAddress(String),

    #[error("timeout `{0}` must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check everything serde cannot.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.store.host.is_empty() {
        errors.push(ValidationError::EmptyStoreField("host"));
    }
    if config.store.port == 0 {
        errors.push(ValidationError::ZeroStorePort);
    }
    if config.store.password.is_empty() {
        errors.push(ValidationError::EmptyStoreField("password"));
    }
    if config.store.route_table.is_empty() {
        errors.push(ValidationError::EmptyStoreField("route_table"));
    }

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::BadBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::BadMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    for (name, value) in [
        ("request_secs", config.timeouts.request_secs),
        ("store_secs", config.timeouts.store_secs),
        ("connect_secs", config.timeouts.connect_secs),
        ("forward_secs", config.timeouts.forward_secs),
        ("invoke_secs", config.timeouts.invoke_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
