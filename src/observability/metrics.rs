//! Metrics collection and exposition.
//!
//! # Metrics
//! - `markdown_server_requests_total` (counter): requests by method, status, kind
//! - `markdown_server_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so handlers always
//!   record and tests need no setup
//! - The Prometheus endpoint is opt-in (`observability.metrics_enabled`)

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from inside the tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, kind: &'static str, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();
    metrics::counter!(
        "markdown_server_requests_total",
        "method" => method.clone(),
        "status" => status.clone(),
        "kind" => kind
    )
    .increment(1);
    metrics::histogram!(
        "markdown_server_request_duration_seconds",
        "method" => method,
        "status" => status,
        "kind" => kind
    )
    .record(start.elapsed().as_secs_f64());
}
