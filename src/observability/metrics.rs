//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (requests, heartbeats)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `requests_total` (counter): HTTP requests by route and status
//! - `heartbeats_total` (counter): heartbeat ticks by outcome
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Exporter installation is best-effort: a service without a metrics
//!   endpoint is degraded, not broken

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must run inside the async runtime. Failure is logged, never fatal.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(err) => tracing::error!(
            address = %addr,
            error = %err,
            "Failed to install metrics exporter"
        ),
    }
}

/// Record one handled HTTP request.
pub fn record_request(route: &'static str, status: u16) {
    metrics::counter!("requests_total", "route" => route, "status" => status.to_string())
        .increment(1);
}

/// Record one heartbeat tick.
pub fn record_heartbeat(outcome: &'static str) {
    metrics::counter!("heartbeats_total", "outcome" => outcome).increment(1);
}
