//! Ollama client using the `/api/generate` endpoint
//!
//! The conversation is flattened into one prompt (see
//! [`serialize_messages`](crate::llm::messages::serialize_messages)) and sent
//! as a single non-streaming request.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_bridge::llm::{ChatMessage, LLMClient, OllamaClient, OllamaConfig};
//!
//! let client = OllamaClient::new(OllamaConfig::default());
//! let reply = client.invoke(&[ChatMessage::user("Hello!")]).await?;
//! println!("{}", reply.completion);
//! ```

use crate::llm::client::{ChatInvokeCompletion, ChatInvokeUsage, LLMClient, ModelProviderError};
use crate::llm::messages::{serialize_messages, ChatMessage};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "llama3:latest";
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Settings for one Ollama model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Extra generation options (`num_ctx`, `top_p`, ...) passed through verbatim
    #[serde(default)]
    pub options: Map<String, Value>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            options: Map::new(),
        }
    }
}

impl OllamaConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// `temperature` first, then the passthrough options; a passthrough
    /// `temperature` replaces the typed one.
    pub fn merged_options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert("temperature".to_string(), Value::from(self.temperature));
        options.extend(self.options.clone());
        options
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

/// Body of `POST /api/generate`
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: String,
    pub options: Map<String, Value>,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

pub struct OllamaClient {
    http: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a caller-built HTTP client, e.g. one with a request timeout
    pub fn with_http_client(config: OllamaConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    pub fn build_request(&self, messages: &[ChatMessage]) -> GenerateRequest<'_> {
        GenerateRequest {
            model: &self.config.model,
            prompt: serialize_messages(messages),
            options: self.config.merged_options(),
            stream: false,
        }
    }

    // Ollama does not report token counts on this endpoint
    fn usage(&self, _response: &GenerateResponse) -> Option<ChatInvokeUsage> {
        None
    }

    fn transport_error(&self, message: String, status: Option<StatusCode>) -> ModelProviderError {
        ModelProviderError::transport(
            message,
            status.map(|s| s.as_u16()),
            self.config.model.as_str(),
        )
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    fn provider(&self) -> &'static str {
        "ollama"
    }

    fn name(&self) -> &str {
        &self.config.model
    }

    async fn invoke(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatInvokeCompletion<String>, ModelProviderError> {
        let url = self.config.generate_url();
        let request = self.build_request(messages);
        debug!(
            model = %self.config.model,
            url = %url,
            messages = messages.len(),
            prompt_chars = request.prompt.len(),
            "Sending Ollama generate request"
        );

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                self.transport_error(format!("Ollama API call failed: {}", e), e.status())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(model = %self.config.model, status = %status, "Ollama returned an error status");
            return Err(self.transport_error(format!("Ollama API error: {}", status), Some(status)));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            self.transport_error(format!("Invalid Ollama response body: {}", e), Some(status))
        })?;
        debug!(
            model = %self.config.model,
            response_chars = body.response.len(),
            "Received Ollama response"
        );

        let usage = self.usage(&body);
        Ok(ChatInvokeCompletion {
            completion: body.response,
            usage,
        })
    }
}
