use crate::llm::client::ModelProviderError;
use crate::utils::toml_config::ConfigError;

// ============= Error Types =============

/// Crate-level error for everything outside a single completion call
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Provider(#[from] ModelProviderError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
