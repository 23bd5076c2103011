//! Template CRUD, preview and render endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::campaign::{RenderedEmail, RuntimeValues};
use crate::domain::template::{
    available_variables, variables_from_json, CreateTemplateRequest, Template, TemplateFilter,
    TemplateListResponse, TemplatePreview, UpdateTemplateRequest, ValidationReport, VariableInfo,
};
use crate::error::Result;
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DuplicateTemplateRequest {
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewTemplateRequest {
    /// Values merged over the default sample data
    #[serde(default)]
    pub sample_data: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct RenderTemplateRequest {
    /// Recipient personalization; non-string values are stringified
    #[serde(default)]
    pub variables: serde_json::Value,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub cta: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VariableListResponse {
    pub available_variables: Vec<VariableInfo>,
}

/// POST /api/v1/templates - Create a new template
#[tracing::instrument(
    name = "http.create_template",
    skip(state, request),
    fields(template_id = ?request.id, layout = request.layout.as_str())
)]
pub async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<Template>)> {
    let created = state.template_store.create(request.into())?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/templates - List active templates
#[tracing::instrument(name = "http.list_templates", skip(state))]
pub async fn list_templates(
    State(state): State<AppState>,
    Query(filter): Query<TemplateFilter>,
) -> Json<TemplateListResponse> {
    let templates = state.template_store.list(&filter);
    let total = templates.len();

    Json(TemplateListResponse { templates, total })
}

/// GET /api/v1/templates/{id} - Get a specific template
#[tracing::instrument(name = "http.get_template", skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Template>> {
    Ok(Json(state.template_store.get(&id)?))
}

/// PUT /api/v1/templates/{id} - Update an existing template
#[tracing::instrument(name = "http.update_template", skip(state, request))]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<Template>> {
    Ok(Json(state.template_store.update(&id, request)?))
}

/// DELETE /api/v1/templates/{id} - Deactivate a template
#[tracing::instrument(name = "http.delete_template", skip(state))]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.template_store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/templates/{id}/duplicate
#[tracing::instrument(name = "http.duplicate_template", skip(state, request))]
pub async fn duplicate_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<DuplicateTemplateRequest>,
) -> Result<(StatusCode, Json<Template>)> {
    let copy = state.template_store.duplicate(&id, request.created_by)?;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// POST /api/v1/templates/{id}/preview - Render with sample data
#[tracing::instrument(name = "http.preview_template", skip(state, request))]
pub async fn preview_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PreviewTemplateRequest>,
) -> Result<Json<TemplatePreview>> {
    let overrides = variables_from_json(&request.sample_data)?;
    Ok(Json(state.template_store.preview(&id, &overrides)?))
}

/// POST /api/v1/templates/{id}/render - Render for one recipient
#[tracing::instrument(name = "http.render_template", skip(state, request))]
pub async fn render_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RenderTemplateRequest>,
) -> Result<Json<RenderedEmail>> {
    let runtime = RuntimeValues {
        personalization: variables_from_json(&request.variables)?,
        subject: request.subject,
        cta: request.cta,
        cta_link: request.cta_link,
    };
    Ok(Json(state.template_store.render(&id, &runtime)?))
}

/// POST /api/v1/templates/validate - Validate without storing
#[tracing::instrument(name = "http.validate_template", skip(state, request))]
pub async fn validate_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> Json<ValidationReport> {
    let template: Template = request.into();
    Json(state.template_store.validate(&template))
}

/// GET /api/v1/templates/variables - Personalization variable catalog
pub async fn list_variables() -> Json<VariableListResponse> {
    Json(VariableListResponse {
        available_variables: available_variables(),
    })
}
