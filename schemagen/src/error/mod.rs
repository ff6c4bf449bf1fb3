//! Error types and error handling

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Generator error type
#[derive(Debug, Error)]
pub enum Error {
    /// Template failed to parse or evaluate
    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Template provider could not supply text for an id
    #[error("Template not found: {id}{}", path.as_ref().map(|p| format!(" ({})", p.display())).unwrap_or_default())]
    TemplateNotFound {
        /// Requested template id
        id: String,
        /// Location that was searched, if any
        path: Option<PathBuf>,
    },

    /// Java type notation could not be parsed
    #[error("Invalid type: {0}")]
    InvalidType(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Configuration value is not one of the accepted forms
    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),

    /// Schema document is malformed or unsupported
    #[error("Schema error: {0}")]
    Schema(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
