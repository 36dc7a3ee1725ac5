// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use crate::error::{AdvisorError, Result};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, HistogramVec, Opts, Registry, TextEncoder, Encoder,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // SUBMISSION METRICS
    // ============================================================================

    /// Image submissions by final outcome
    pub static ref SUBMISSIONS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("submissions_total", "Total image submissions"),
        &["outcome"], // outcome: done, or the error kind
        REGISTRY
    ).unwrap();

    /// Accepted upload sizes
    pub static ref UPLOAD_BYTES: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("upload_bytes", "Size of accepted uploads in bytes")
            .buckets(vec![16e3, 64e3, 256e3, 1e6, 4e6, 10e6, 20e6]),
        &["content_type"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // GEMINI API METRICS
    // ============================================================================

    /// Total Gemini inference calls
    pub static ref INFERENCE_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("inference_calls_total", "Total Gemini inference calls"),
        &["model", "outcome"],
        REGISTRY
    ).unwrap();

    /// Gemini inference call duration
    pub static ref INFERENCE_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("inference_duration_seconds", "Gemini inference call duration")
            .buckets(vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0]),
        &["model"],
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| AdvisorError::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| AdvisorError::Internal(format!("Metrics are not UTF-8: {}", e)))
}
