//! Configuration loading from the environment.
//!
//! # Responsibilities
//! - Map environment variables onto the schema
//! - Fail startup when the store settings are absent
//! - Keep parsing separate from semantic validation

use std::env;

use thiserror::Error;

use crate::config::schema::{CredentialPolicy, RouterConfig};
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_STORE_HOST: &str = "ROUTER_STORE_HOST";
pub const ENV_STORE_PORT: &str = "ROUTER_STORE_PORT";
pub const ENV_STORE_PASSWORD: &str = "ROUTER_STORE_PASSWORD";
pub const ENV_ROUTE_TABLE: &str = "ROUTER_ROUTE_TABLE";
pub const ENV_BIND_ADDRESS: &str = "ROUTER_BIND_ADDRESS";
pub const ENV_MAX_BODY_BYTES: &str = "ROUTER_MAX_BODY_BYTES";
pub const ENV_REQUEST_TIMEOUT: &str = "ROUTER_REQUEST_TIMEOUT_SECS";
pub const ENV_STORE_TIMEOUT: &str = "ROUTER_STORE_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT: &str = "ROUTER_CONNECT_TIMEOUT_SECS";
pub const ENV_FORWARD_TIMEOUT: &str = "ROUTER_FORWARD_TIMEOUT_SECS";
pub const ENV_INVOKE_TIMEOUT: &str = "ROUTER_INVOKE_TIMEOUT_SECS";
pub const ENV_REGION: &str = "ROUTER_FUNCTION_REGION";
pub const ENV_CREDENTIAL_POLICY: &str = "ROUTER_CREDENTIAL_POLICY";
pub const ENV_LOG_FILTER: &str = "ROUTER_LOG_FILTER";
pub const ENV_METRICS_ENABLED: &str = "ROUTER_METRICS_ENABLED";
pub const ENV_METRICS_ADDRESS: &str = "ROUTER_METRICS_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is missing")]
    MissingVar(&'static str),

    #[error("environment variable {var} is invalid: {reason}")]
    InvalidVar { var: &'static str, reason: String },

    #[error("configuration validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl RouterConfig {
    /// Load and validate configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load from an arbitrary variable lookup. Split out so tests can feed a
    /// map instead of mutating process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = RouterConfig::default();

        config.store.host = required(&lookup, ENV_STORE_HOST)?;
        config.store.port = parsed(&lookup, ENV_STORE_PORT)?.ok_or(ConfigError::MissingVar(
            ENV_STORE_PORT,
        ))?;
        config.store.password = required(&lookup, ENV_STORE_PASSWORD)?;
        config.store.route_table = required(&lookup, ENV_ROUTE_TABLE)?;

        if let Some(address) = lookup(ENV_BIND_ADDRESS) {
            config.listener.bind_address = address;
        }
        if let Some(bytes) = parsed(&lookup, ENV_MAX_BODY_BYTES)? {
            config.listener.max_body_bytes = bytes;
        }
        if let Some(secs) = parsed(&lookup, ENV_REQUEST_TIMEOUT)? {
            config.timeouts.request_secs = secs;
        }
        if let Some(secs) = parsed(&lookup, ENV_STORE_TIMEOUT)? {
            config.timeouts.store_secs = secs;
        }
        if let Some(secs) = parsed(&lookup, ENV_CONNECT_TIMEOUT)? {
            config.timeouts.connect_secs = secs;
        }
        if let Some(secs) = parsed(&lookup, ENV_FORWARD_TIMEOUT)? {
            config.timeouts.forward_secs = secs;
        }
        if let Some(secs) = parsed(&lookup, ENV_INVOKE_TIMEOUT)? {
            config.timeouts.invoke_secs = secs;
        }

        config.invoker.region = lookup(ENV_REGION);
        if let Some(policy) = lookup(ENV_CREDENTIAL_POLICY) {
            config.invoker.credential_policy = match policy.as_str() {
                "caller" => CredentialPolicy::Caller,
                "ambient" => CredentialPolicy::Ambient,
                other => {
                    return Err(ConfigError::InvalidVar {
                        var: ENV_CREDENTIAL_POLICY,
                        reason: format!("unknown policy `{other}`"),
                    })
                }
            };
        }

        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            config.observability.log_filter = filter;
        }
        if let Some(enabled) = parsed(&lookup, ENV_METRICS_ENABLED)? {
            config.observability.metrics_enabled = enabled;
        }
        if let Some(address) = lookup(ENV_METRICS_ADDRESS) {
            config.observability.metrics_address = address;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    match lookup(var) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|err| ConfigError::InvalidVar {
                var,
                reason: err.to_string(),
            }),
    }
}
