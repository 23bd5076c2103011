//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub templates: TemplateHealthResponse,
    pub screens: ScreenHealthResponse,
}

#[derive(Debug, Serialize)]
pub struct TemplateHealthResponse {
    pub active: usize,
}

#[derive(Debug, Serialize)]
pub struct ScreenHealthResponse {
    pub enabled: usize,
    pub total: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        templates: TemplateHealthResponse {
            active: state.template_store.count(),
        },
        screens: ScreenHealthResponse {
            enabled: state.screens.enabled_count(),
            total: state.screens.total_count(),
        },
    })
}
