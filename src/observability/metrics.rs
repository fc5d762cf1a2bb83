//! Metrics collection and exposition.
//!
//! # Metrics
//! - `taskboard_requests_total` (counter): API calls by operation and outcome
//! - `taskboard_tasks` (gauge): tasks currently stored, refreshed by list, create and delete

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one API operation.
pub fn record_operation(operation: &'static str, outcome: &'static str) {
    ::metrics::counter!(
        "taskboard_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record the current number of stored tasks.
pub fn record_task_count(count: usize) {
    ::metrics::gauge!("taskboard_tasks").set(count as f64);
}
