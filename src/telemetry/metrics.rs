//! Prometheus metrics setup and metric definitions

use anyhow::Context;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    // Seconds. Outbound calls are bounded by a few seconds, so the upper
    // buckets stop at 10.
    let buckets = [
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .context("failed to set histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Register metric descriptions and emit initial zero values so Prometheus output
/// includes HELP/TYPE lines for all metrics from startup (not just after first use).
pub fn describe_metrics() {
    // HTTP metrics
    describe_counter!("uprava_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "uprava_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "uprava_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    // Peer service calls
    describe_counter!(
        "uprava_outbound_requests_total",
        "Outbound calls to peer services by peer and outcome"
    );
    describe_histogram!(
        "uprava_outbound_request_duration_seconds",
        "Outbound call duration in seconds"
    );

    // Access and business rules
    describe_counter!(
        "uprava_role_gate_rejections_total",
        "Requests rejected by the role gate by reason"
    );
    describe_counter!(
        "uprava_warrant_gate_denials_total",
        "Permit and registration requests denied for outstanding warrants"
    );
    describe_counter!(
        "uprava_cascade_failures_total",
        "Suspensions stored without their driving ban"
    );

    gauge!("uprava_http_requests_in_flight").set(0.0);
    counter!("uprava_warrant_gate_denials_total").absolute(0);
    counter!("uprava_cascade_failures_total", "kind" => "status").absolute(0);
}
