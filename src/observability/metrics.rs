//! Metrics collection and exposition.
//!
//! # Metrics
//! - `steem_rpc_requests_total` (counter): JSON-RPC exchanges by method and outcome
//! - `steem_retries_total` (counter): retry attempts by call label
//! - `steem_retry_exhausted_total` (counter): calls that passed the retry ceiling

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one JSON-RPC exchange.
pub fn record_rpc_request(method: &str, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    counter!(
        "steem_rpc_requests_total",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record one retry of a labelled call.
pub fn record_retry(label: &str) {
    counter!("steem_retries_total", "label" => label.to_string()).increment(1);
}

/// Record a call that gave up.
pub fn record_retry_exhausted(label: &str) {
    counter!("steem_retry_exhausted_total", "label" => label.to_string()).increment(1);
}
