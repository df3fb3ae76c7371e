//! Metrics and observability utilities
//!
//! Provides Prometheus metrics for figure builds and dataset size
//! with standardized naming conventions.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all dashboard metrics
pub const METRICS_PREFIX: &str = "provenance";

/// Histogram buckets for figure build latency (in seconds)
/// Builds walk a few hundred rows, so almost everything lands under 10ms
pub const BUILD_BUCKETS: &[f64] = &[
    0.0001, // 100us
    0.0005, // 500us
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.500,  // 500ms
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    describe_counter!(
        format!("{}_figure_builds_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of figure descriptions built"
    );

    describe_histogram!(
        format!("{}_figure_build_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Figure build latency in seconds"
    );

    describe_gauge!(
        format!("{}_dataset_rows", METRICS_PREFIX),
        Unit::Count,
        "Rows loaded per input table"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record a figure build
pub fn record_figure_build(duration_secs: f64, figure_id: &str, kind: &str, exclude_outliers: bool) {
    counter!(
        format!("{}_figure_builds_total", METRICS_PREFIX),
        "figure" => figure_id.to_string(),
        "kind" => kind.to_string(),
        "exclude" => exclude_outliers.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_figure_build_duration_seconds", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .record(duration_secs);
}

/// Helper to record the size of a loaded table
pub fn record_dataset_rows(table: &str, rows: usize) {
    gauge!(
        format!("{}_dataset_rows", METRICS_PREFIX),
        "table" => table.to_string()
    )
    .set(rows as f64);
}
