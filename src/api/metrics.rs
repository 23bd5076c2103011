//! Prometheus metrics endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::metrics::{self, StoreMetrics};
use crate::server::AppState;

/// GET /metrics - Prometheus metrics endpoint
pub async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    update_metrics_from_state(&state);

    match metrics::encode_metrics() {
        Ok(output) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            output,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode Prometheus metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(axum::http::header::CONTENT_TYPE, "text/plain")],
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}

/// Refresh point-in-time gauges from AppState
fn update_metrics_from_state(state: &AppState) {
    StoreMetrics::set_templates_active(state.template_store.count());
    StoreMetrics::set_screens_enabled(state.screens.enabled_count());
}
