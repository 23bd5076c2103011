use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::{api_routes, public_routes};

use super::{api_key_auth, AppState};

/// Upper bound for request bodies; templates are small HTML documents
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = if state.settings.server.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .settings
            .server
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let protected = api_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        api_key_auth,
    ));

    Router::new()
        .merge(public_routes())
        .nest("/api/v1", protected)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // Add state
        .with_state(state)
}
