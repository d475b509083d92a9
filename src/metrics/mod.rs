// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, NORMALIZED_IMAGE_BYTES, REQUESTS_TOTAL, REQUEST_DURATION, UPSTREAM_CALLS,
    UPSTREAM_DURATION,
};

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    let status = status_code.to_string();
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint, &status])
        .observe(duration_secs);
}

/// Helper to record Gemini API call metrics. `None` means the call never got a response.
pub fn record_upstream_call(status_code: Option<u16>, duration_secs: f64) {
    let status = status_code
        .map(|s| s.to_string())
        .unwrap_or_else(|| "error".to_string());

    UPSTREAM_CALLS.with_label_values(&[&status]).inc();
    UPSTREAM_DURATION
        .with_label_values(&[&status])
        .observe(duration_secs);
}

pub fn record_normalized_image(jpeg_len: usize) {
    NORMALIZED_IMAGE_BYTES.observe(jpeg_len as f64);
}
