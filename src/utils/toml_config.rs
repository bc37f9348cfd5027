//! TOML-based configuration for llm-bridge
//!
//! Named providers are declared in `llm-bridge.toml`:
//!
//! ```toml
//! default_provider = "local"
//!
//! [providers.local]
//! type = "ollama"
//! model = "llama3:latest"
//! temperature = 0.7
//! base_url = "http://localhost:11434"
//!
//! [providers.local.options]
//! num_ctx = 4096
//! ```

use crate::llm::client::LLMClient;
use crate::llm::ollama::{OllamaClient, OllamaConfig};
use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "llm-bridge.toml";

const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

/// Root configuration structure loaded from llm-bridge.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmBridgeConfig {
    /// Provider used when none is named explicitly
    #[serde(default = "default_provider_name")]
    pub default_provider: String,

    /// Named LLM provider configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_provider_name() -> String {
    "local".to_string()
}

impl Default for LlmBridgeConfig {
    fn default() -> Self {
        let mut providers = HashMap::new();
        providers.insert(
            default_provider_name(),
            ProviderConfig::Ollama(OllamaConfig::default()),
        );

        Self {
            default_provider: default_provider_name(),
            providers,
        }
    }
}

// ============= Provider Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Ollama(OllamaConfig),
}

impl ProviderConfig {
    /// Backend name as written in the `type` key
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderConfig::Ollama(_) => "ollama",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            ProviderConfig::Ollama(config) => &config.model,
        }
    }

    /// Build a client for this provider
    pub fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            ProviderConfig::Ollama(config) => {
                if config.model.trim().is_empty() {
                    return Err(AppError::Configuration(
                        "Ollama provider requires a model name".to_string(),
                    ));
                }
                Ok(Box::new(OllamaClient::new(config.clone())))
            }
        }
    }

    fn validate(&self, name: &str) -> std::result::Result<(), ConfigError> {
        match self {
            ProviderConfig::Ollama(config) => {
                if config.model.trim().is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "Provider '{}' has an empty model name",
                        name
                    )));
                }
                if !TEMPERATURE_RANGE.contains(&config.temperature) {
                    return Err(ConfigError::ValidationError(format!(
                        "Provider '{}' temperature {} is outside {:?}",
                        name, config.temperature, TEMPERATURE_RANGE
                    )));
                }
                if !(config.base_url.starts_with("http://")
                    || config.base_url.starts_with("https://"))
                {
                    return Err(ConfigError::ValidationError(format!(
                        "Provider '{}' base_url must start with http:// or https:// (got '{}')",
                        name, config.base_url
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Provider '{0}' is not defined in the configuration")]
    MissingProvider(String),
}

impl LlmBridgeConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: LlmBridgeConfig = toml::from_str(&content)?;
        config.validate()?;

        info!(
            path = %path.display(),
            providers = config.providers.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.providers.contains_key(&self.default_provider) {
            return Err(ConfigError::MissingProvider(self.default_provider.clone()));
        }

        for (name, provider) in &self.providers {
            provider.validate(name)?;
        }

        Ok(())
    }

    /// Look up a provider by name, or the default provider when `name` is `None`
    pub fn provider(&self, name: Option<&str>) -> std::result::Result<&ProviderConfig, ConfigError> {
        let name = name.unwrap_or(self.default_provider.as_str());
        self.providers
            .get(name)
            .ok_or_else(|| ConfigError::MissingProvider(name.to_string()))
    }

    /// Provider names in sorted order
    pub fn provider_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
