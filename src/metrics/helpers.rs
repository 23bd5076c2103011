//! Metrics helper structs for convenient metric recording

use std::time::Duration;

use prometheus::{Encoder, TextEncoder};

use super::{
    CONTENT_FALLBACKS_TOTAL, RENDERS_TOTAL, RENDER_LATENCY, SCREENS_ENABLED, TEMPLATES_ACTIVE,
    VALIDATION_FAILURES_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording render metrics
pub struct RenderMetrics;

impl RenderMetrics {
    /// Record a completed render
    pub fn record_render(kind: &str, elapsed: Duration) {
        RENDERS_TOTAL.with_label_values(&[kind]).inc();
        RENDER_LATENCY
            .with_label_values(&[kind])
            .observe(elapsed.as_secs_f64());
    }

    /// Record stored content degraded to a fragment
    pub fn record_fallback() {
        CONTENT_FALLBACKS_TOTAL.inc();
    }

    /// Record a template rejected by validation
    pub fn record_validation_failure() {
        VALIDATION_FAILURES_TOTAL.inc();
    }
}

/// Helper struct for point-in-time gauges
pub struct StoreMetrics;

impl StoreMetrics {
    pub fn set_templates_active(count: usize) {
        TEMPLATES_ACTIVE.set(count as i64);
    }

    pub fn set_screens_enabled(count: usize) {
        SCREENS_ENABLED.set(count as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_render_counts_by_kind() {
        let before = RENDERS_TOTAL.with_label_values(&["sections"]).get();
        RenderMetrics::record_render("sections", Duration::from_micros(40));
        assert!(RENDERS_TOTAL.with_label_values(&["sections"]).get() > before);
    }

    #[test]
    fn test_encode_includes_prefix() {
        RenderMetrics::record_fallback();
        let output = encode_metrics().unwrap();
        assert!(output.contains("campaign_template_content_fallbacks_total"));
    }
}
