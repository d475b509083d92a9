// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_histogram_with_registry, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec,
    Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Total number of inbound requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of inbound requests"),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).expect("requests_total registers");

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).expect("request_duration_seconds registers");

    // ============================================================================
    // UPSTREAM METRICS
    // ============================================================================

    /// Total Gemini API calls, by upstream status ("error" for transport failures)
    pub static ref UPSTREAM_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("gemini_api_calls_total", "Total Gemini API calls"),
        &["status_code"],
        REGISTRY
    ).expect("gemini_api_calls_total registers");

    /// Gemini API call duration
    pub static ref UPSTREAM_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("gemini_api_duration_seconds", "Gemini API call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["status_code"],
        REGISTRY
    ).expect("gemini_api_duration_seconds registers");

    // ============================================================================
    // IMAGE METRICS
    // ============================================================================

    /// Size of normalized JPEGs sent upstream
    pub static ref NORMALIZED_IMAGE_BYTES: Histogram = register_histogram_with_registry!(
        HistogramOpts::new("normalized_image_bytes", "Size of normalized JPEG payloads in bytes")
            .buckets(prometheus::exponential_buckets(4096.0, 4.0, 8).unwrap_or_default()),
        REGISTRY
    ).expect("normalized_image_bytes registers");
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        REQUESTS_TOTAL.with_label_values(&["POST", "/classify", "200"]).inc();
        UPSTREAM_CALLS.with_label_values(&["200"]).inc();
        NORMALIZED_IMAGE_BYTES.observe(1024.0);

        let metrics = gather_metrics().unwrap();
        assert!(metrics.contains("requests_total"));
        assert!(metrics.contains("gemini_api_calls_total"));
        assert!(metrics.contains("normalized_image_bytes"));
    }
}
