//! Metrics collection and exposition.
//!
//! # Metrics
//! - `coretime_purchases_total` (counter): purchase attempts by network, outcome
//! - `coretime_status_events_total` (counter): status events by kind
//!
//! Counters are no-ops unless an exporter has been installed.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
///
/// The HTTP listener stops when the process exits.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the result of one network's purchase.
pub fn record_purchase(network: &str, outcome: &'static str) {
    ::metrics::counter!(
        "coretime_purchases_total",
        "network" => network.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a status event observed by the resolver.
pub fn record_status_event(kind: &'static str) {
    ::metrics::counter!("coretime_status_events_total", "kind" => kind).increment(1);
}
