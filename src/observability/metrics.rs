//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by response status
//! - `relay_request_duration_seconds` (histogram): end-to-end latency
//! - `relay_rate_limited_total` (counter): admissions denied by the limiter
//! - `relay_transport_failures_total` (counter): failed outbound attempts

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`. Call once, after the runtime
/// is up; metric recording works (as a no-op) even if this is never called.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("relay_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("relay_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

pub fn record_rate_limited() {
    metrics::counter!("relay_rate_limited_total").increment(1);
}

pub fn record_transport_failure() {
    metrics::counter!("relay_transport_failures_total").increment(1);
}
