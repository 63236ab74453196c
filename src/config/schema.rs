//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits; values come from the environment via
//! `env.rs`, with semantic checks in `validation.rs`.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, body cap).
    pub listener: ListenerConfig,

    /// Route store connection settings. Required; no usable defaults.
    pub store: StoreConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Function invoker settings.
    pub invoker: InvokerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RouterConfig {
    /// Echo the effective configuration at startup, credential redacted.
    pub fn log_startup(&self) {
        let password = if self.store.password.is_empty() {
            "not set"
        } else {
            "*****"
        };
        tracing::info!(
            bind_address = %self.listener.bind_address,
            store_host = %self.store.host,
            store_port = self.store.port,
            store_password = %password,
            route_table = %self.store.route_table,
            credential_policy = ?self.invoker.credential_policy,
            request_timeout_secs = self.timeouts.request_secs,
            "Configuration loaded"
        );
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Route store connection settings.
///
/// Host, port, password, and table name have no defaults; startup fails
/// without them.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub password: String,

    /// Name of the hash holding path → descriptor mappings.
    pub route_table: String,
}

/// Timeout configuration for the request path and both outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time budget for one inbound request.
    pub request_secs: u64,

    /// Route store connect and per-lookup timeout.
    pub store_secs: u64,

    /// Upstream connection establishment timeout.
    pub connect_secs: u64,

    /// Outbound HTTP forward timeout.
    pub forward_secs: u64,

    /// Remote function invocation timeout.
    pub invoke_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            store_secs: 5,
            connect_secs: 5,
            forward_secs: 20,
            invoke_secs: 20,
        }
    }
}

/// Where the credentials for function invocation come from.
///
/// `Caller` reads `id`/`key` from each request's query parameters: the
/// backend is invoked with whatever credentials the caller presents, so the
/// caller (not the router) is the trust boundary. `Ambient` ignores the
/// request and uses the process credential chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CredentialPolicy {
    #[default]
    Caller,
    Ambient,
}

/// Function invoker settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InvokerConfig {
    /// Region override; the ambient SDK chain applies when unset.
    pub region: Option<String>,

    pub credential_policy: CredentialPolicy,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter when RUST_LOG is unset.
    pub log_filter: String,

    /// Enable the metrics exporter.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "edge_router=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
