//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): handled requests by route, status
//! - `relay_request_duration_seconds` (histogram): latency by route
//! - `relay_upstream_failures_total` (counter): failures by kind
//!   (`status` or `transport`)
//!
//! # Design Decisions
//! - Prometheus exporter installed only when enabled in config
//! - Labels are bounded: route templates, not raw paths

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled relay request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "relay_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("relay_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record an upstream call that did not succeed.
pub fn record_upstream_failure(kind: &'static str) {
    metrics::counter!("relay_upstream_failures_total", "kind" => kind).increment(1);
}
