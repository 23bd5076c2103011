//! Ad-hoc standard layout rendering.

use std::time::Instant;

use axum::{extract::State, response::Html, Json};

use crate::domain::template::{StandardLayoutVariables, TemplateError};
use crate::error::Result;
use crate::metrics::RenderMetrics;
use crate::server::AppState;

/// POST /api/v1/render/standard - Fill the standard skeleton from the given fields
#[tracing::instrument(name = "http.render_standard", skip(state, body))]
pub async fn render_standard(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Html<String>> {
    let serde_json::Value::Object(map) = body else {
        let message = "Fields must be an object".to_string();
        return Err(TemplateError::SubstitutionFailed(message).into());
    };
    let variables = StandardLayoutVariables::from_json_object(&map);

    let started = Instant::now();
    let html = state
        .template_store
        .resolver()
        .standard_renderer()
        .render(&variables);
    RenderMetrics::record_render("standard", started.elapsed());

    Ok(Html(html))
}
