//! Configuration errors

use thiserror::Error;

use crate::schema::RegistryError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("type registration failed: {0}")]
    Registry(#[from] RegistryError),
}

impl ConfigError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "ATTR_CONFIG_IO_ERROR",
            ConfigError::Parse(_) => "ATTR_CONFIG_PARSE_ERROR",
            ConfigError::Invalid(_) => "ATTR_CONFIG_INVALID",
            ConfigError::Registry(_) => "ATTR_CONFIG_REGISTRY_ERROR",
        }
    }
}
