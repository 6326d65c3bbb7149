//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by route, status
//! - `edge_request_duration_seconds` (histogram): latency by route
//! - `edge_store_lookups_total` (counter): object store hits, misses, errors
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!("edge_requests_total", "route" => route, "status" => status.to_string()).increment(1);
    histogram!("edge_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// `result` is one of `hit`, `miss`, `error`.
pub fn record_store_lookup(result: &'static str) {
    counter!("edge_store_lookups_total", "result" => result).increment(1);
}
