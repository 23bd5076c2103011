use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::preferences::PreferenceError;
use crate::domain::template::TemplateError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

/// Check if running in production mode (based on RUN_MODE env var)
fn is_production() -> bool {
    std::env::var("RUN_MODE")
        .map(|m| m == "production" || m == "prod")
        .unwrap_or(false)
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Auth(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Template(e) => match e {
                TemplateError::NotFound(_) => (StatusCode::NOT_FOUND, "TEMPLATE_NOT_FOUND"),
                TemplateError::AlreadyExists(_) => (StatusCode::CONFLICT, "TEMPLATE_EXISTS"),
                TemplateError::InvalidId(_) => (StatusCode::BAD_REQUEST, "INVALID_TEMPLATE_ID"),
                TemplateError::Validation(_) => (StatusCode::BAD_REQUEST, "INVALID_TEMPLATE"),
                TemplateError::SubstitutionFailed(_) => {
                    (StatusCode::BAD_REQUEST, "SUBSTITUTION_FAILED")
                }
            },
            AppError::Preference(e) => match e {
                PreferenceError::UnknownScreen(_) => (StatusCode::NOT_FOUND, "SCREEN_NOT_FOUND"),
                PreferenceError::Locked(_) => (StatusCode::CONFLICT, "SCREEN_LOCKED"),
                PreferenceError::Serialization(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let log_message = self.to_string();

        let client_message = if status.is_server_error() && is_production() {
            "Internal server error".to_string()
        } else {
            log_message.clone()
        };

        let details = match &self {
            AppError::Template(TemplateError::Validation(errors)) => errors.clone(),
            _ => Vec::new(),
        };

        // Always log the detailed error server-side
        if status.is_server_error() {
            tracing::error!(
                code = %code,
                status = %status.as_u16(),
                message = %log_message,
                "API error"
            );
        } else {
            tracing::warn!(
                code = %code,
                status = %status.as_u16(),
                message = %log_message,
                "API request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: client_message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
