//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by route, status
//! - `gateway_request_duration_seconds` (histogram): latency by route
//! - `gateway_route_misses_total` (counter): requests no route matched
//! - `gateway_route_table_reloads_total` (counter): reloads by result
//! - `gateway_route_table_size` (gauge): declared routes in the live table
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops until a recorder is installed
//! - Prometheus exporter served on its own listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a routed request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    counter!("gateway_requests_total", "route" => route.clone(), "status" => status.to_string())
        .increment(1);
    histogram!("gateway_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a request that no route matched.
pub fn record_miss() {
    counter!("gateway_route_misses_total").increment(1);
}

/// Record a route table reload attempt.
pub fn record_reload(success: bool) {
    let result = if success { "ok" } else { "rejected" };
    counter!("gateway_route_table_reloads_total", "result" => result).increment(1);
}

pub fn record_route_table(size: usize) {
    gauge!("gateway_route_table_size").set(size as f64);
}
