// Shared components
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Domain layer (business logic)
pub mod domain;

// Re-export domain modules at the crate root
pub use domain::campaign;
pub use domain::preferences;
pub use domain::template;

// Application layer
pub mod api;
pub mod server;
