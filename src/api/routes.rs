use axum::{
    routing::{get, post, put},
    Router,
};

use crate::server::AppState;

use super::health::health;
use super::metrics::prometheus_metrics;
use super::preferences::{bulk_toggle_screens, list_screens, reset_screens, toggle_screen};
use super::render::render_standard;
use super::template::{
    create_template, delete_template, duplicate_template, get_template, list_templates,
    list_variables, preview_template, render_template, update_template, validate_template,
};

/// Unauthenticated operational endpoints
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
}

/// Endpoints mounted under `/api/v1`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Templates
        .route("/templates", post(create_template).get(list_templates))
        .route("/templates/validate", post(validate_template))
        .route("/templates/variables", get(list_variables))
        .route(
            "/templates/{id}",
            get(get_template).put(update_template).delete(delete_template),
        )
        .route("/templates/{id}/duplicate", post(duplicate_template))
        .route("/templates/{id}/preview", post(preview_template))
        .route("/templates/{id}/render", post(render_template))
        // Ad-hoc rendering
        .route("/render/standard", post(render_standard))
        // Console settings
        .route("/settings/screens", get(list_screens))
        .route("/settings/screens/bulk", post(bulk_toggle_screens))
        .route("/settings/screens/reset", post(reset_screens))
        .route("/settings/screens/{id}", put(toggle_screen))
}
