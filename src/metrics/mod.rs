// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    INFERENCE_CALLS,
    INFERENCE_DURATION,
    SUBMISSIONS_TOTAL,
    UPLOAD_BYTES,
};

/// Helper to record the final outcome of one submission
pub fn record_submission(outcome: &str) {
    SUBMISSIONS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to record an accepted upload
pub fn record_upload(content_type: &str, size: usize) {
    UPLOAD_BYTES
        .with_label_values(&[content_type])
        .observe(size as f64);
}

/// Helper to record Gemini inference call metrics
pub fn record_inference(model: &str, outcome: &str, duration_secs: f64) {
    INFERENCE_CALLS
        .with_label_values(&[model, outcome])
        .inc();

    INFERENCE_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}
