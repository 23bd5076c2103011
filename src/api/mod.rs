//! API layer - HTTP endpoint handlers organized by domain.

mod health;
mod metrics;
mod preferences;
mod render;
mod routes;
mod template;

// Re-export all handlers for use in server/app.rs
pub use health::health;
pub use metrics::prometheus_metrics;
pub use preferences::{bulk_toggle_screens, list_screens, reset_screens, toggle_screen};
pub use render::render_standard;
pub use routes::{api_routes, public_routes};
pub use template::{
    create_template, delete_template, duplicate_template, get_template, list_templates,
    list_variables, preview_template, render_template, update_template, validate_template,
};
