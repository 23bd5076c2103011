//! Screen visibility endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::domain::preferences::VisibilitySnapshot;
use crate::error::Result;
use crate::metrics::StoreMetrics;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleScreenRequest {
    pub enabled: bool,
}

fn snapshot(state: &AppState) -> Json<VisibilitySnapshot> {
    let snapshot = state.screens.snapshot();
    StoreMetrics::set_screens_enabled(snapshot.enabled_count);
    Json(snapshot)
}

/// GET /api/v1/settings/screens
pub async fn list_screens(State(state): State<AppState>) -> Json<VisibilitySnapshot> {
    snapshot(&state)
}

/// PUT /api/v1/settings/screens/{id}
#[tracing::instrument(name = "http.toggle_screen", skip(state))]
pub async fn toggle_screen(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ToggleScreenRequest>,
) -> Result<Json<VisibilitySnapshot>> {
    state.screens.toggle(&id, request.enabled)?;
    Ok(snapshot(&state))
}

/// POST /api/v1/settings/screens/bulk
#[tracing::instrument(name = "http.bulk_toggle_screens", skip(state))]
pub async fn bulk_toggle_screens(
    State(state): State<AppState>,
    Json(request): Json<ToggleScreenRequest>,
) -> Result<Json<VisibilitySnapshot>> {
    state.screens.bulk_toggle(request.enabled)?;
    Ok(snapshot(&state))
}

/// POST /api/v1/settings/screens/reset
#[tracing::instrument(name = "http.reset_screens", skip(state))]
pub async fn reset_screens(State(state): State<AppState>) -> Result<Json<VisibilitySnapshot>> {
    state.screens.reset()?;
    Ok(snapshot(&state))
}
