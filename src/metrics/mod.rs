//! Prometheus metrics for the campaign template service.
//!
//! This module provides metrics for monitoring template rendering:
//! - Render counts by content kind (standard, sections, raw_html, fragment)
//! - Render latency
//! - Validation rejections
//! - Degraded content that fell back to the wrapped fragment document
//! - Template and screen preference gauges

mod helpers;

pub use helpers::{encode_metrics, RenderMetrics, StoreMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, register_int_gauge,
    HistogramVec, IntCounter, IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "campaign";

lazy_static! {
    // ============================================================================
    // Render Metrics
    // ============================================================================

    /// Total renders by content kind
    pub static ref RENDERS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_template_renders_total", METRIC_PREFIX),
        "Total templates rendered",
        &["kind"]
    ).unwrap();

    /// Render latency by content kind
    pub static ref RENDER_LATENCY: HistogramVec = register_histogram_vec!(
        format!("{}_template_render_latency_seconds", METRIC_PREFIX),
        "Template render latency in seconds",
        &["kind"],
        vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]
    ).unwrap();

    /// Stored content that could not be parsed and was rendered as a fragment
    pub static ref CONTENT_FALLBACKS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_template_content_fallbacks_total", METRIC_PREFIX),
        "Total stored contents degraded to the fallback fragment document"
    ).unwrap();

    // ============================================================================
    // Store Metrics
    // ============================================================================

    /// Templates rejected by structural validation
    pub static ref VALIDATION_FAILURES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_template_validation_failures_total", METRIC_PREFIX),
        "Total templates rejected by validation"
    ).unwrap();

    /// Number of active templates
    pub static ref TEMPLATES_ACTIVE: IntGauge = register_int_gauge!(
        format!("{}_templates_active", METRIC_PREFIX),
        "Number of active templates"
    ).unwrap();

    /// Number of enabled screens
    pub static ref SCREENS_ENABLED: IntGauge = register_int_gauge!(
        format!("{}_screens_enabled", METRIC_PREFIX),
        "Number of enabled console screens"
    ).unwrap();
}
