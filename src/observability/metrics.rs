//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_dispatches_total` (counter): dispatches by destination kind and
//!   status code
//! - `router_dispatch_duration_seconds` (histogram): end-to-end resolve
//!   latency
//!
//! # Design Decisions
//! - Updates are cheap label lookups plus atomic increments
//! - The exporter is optional; recording without it is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            metrics::describe_counter!(
                "router_dispatches_total",
                "Dispatches by destination kind and status code"
            );
            metrics::describe_histogram!(
                "router_dispatch_duration_seconds",
                "End-to-end resolve latency in seconds"
            );
            tracing::info!(address = %addr, "Metrics exporter started");
        }
        Err(err) => {
            tracing::error!(address = %addr, error = %err, "Failed to start metrics exporter");
        }
    }
}

/// Record one finished dispatch.
pub fn record_dispatch(kind: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "router_dispatches_total",
        "kind" => kind,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("router_dispatch_duration_seconds", "kind" => kind)
        .record(start.elapsed().as_secs_f64());
}
