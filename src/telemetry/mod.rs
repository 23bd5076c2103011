//! Tracing subscriber setup.
//!
//! Log level comes from `RUST_LOG` (default `info`); output format comes
//! from `logging.format`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize the global tracing subscriber.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(
    config: &LoggingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()?,
        LogFormat::Plain => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
    }

    tracing::info!(format = ?config.format, "Tracing initialized");
    Ok(())
}
