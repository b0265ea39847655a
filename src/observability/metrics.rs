//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): forwarded requests by method, status
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency
//! - `gateway_requests_signed_total` (counter): requests passed through the signer

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a request passing through the signer.
pub fn record_signed() {
    counter!("gateway_requests_signed_total").increment(1);
}
