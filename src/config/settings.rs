use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::domain::template::{EmptyValuePolicy, ValidationStrictness};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub rendering: RenderingConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// When set, `/api/v1` requires a matching `X-API-Key` header
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderingConfig {
    /// How empty caller values are treated by the standard layout
    #[serde(default)]
    pub empty_value_policy: EmptyValuePolicy,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub strictness: ValidationStrictness,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// Load the starter templates on startup
    #[serde(default = "default_seed_builtin")]
    pub seed_builtin: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_seed_builtin() -> bool {
    true
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8082)?
            .set_default("rendering.empty_value_policy", "override")?
            .set_default("validation.strictness", "strict")?
            .set_default("templates.seed_builtin", true)?
            .set_default("logging.format", "plain")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SERVER__PORT, API__KEY, RENDERING__EMPTY_VALUE_POLICY, etc.
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            seed_builtin: default_seed_builtin(),
        }
    }
}
