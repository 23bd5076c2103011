mod settings;

pub use settings::{
    ApiConfig, LogFormat, LoggingConfig, RenderingConfig, ServerConfig, Settings,
    TemplatesConfig, ValidationConfig,
};
