//! LLM client abstraction shared by every provider
//!
//! A provider implements [`LLMClient`], which returns raw completion text.
//! Structured output comes for free through [`LLMClientExt`], which runs the
//! raw text through the [repair parser](super::parser) and deserializes it.

use crate::llm::messages::ChatMessage;
use crate::llm::parser::{self, ParseError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Generic LLM client trait for provider abstraction
///
/// All LLM providers implement this trait, allowing for easy swapping
/// between providers without changing application code.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Constant identifying the backend (e.g. `"ollama"`)
    fn provider(&self) -> &'static str;

    /// The configured model identifier
    fn name(&self) -> &str;

    /// Run one completion over the conversation and return the raw text
    async fn invoke(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatInvokeCompletion<String>, ModelProviderError>;
}

/// Structured output on top of any [`LLMClient`]
#[async_trait]
pub trait LLMClientExt: LLMClient {
    /// Run one completion and deserialize the repaired JSON into `T`.
    ///
    /// Parser failures are reported as [`ModelProviderError`]s whose message
    /// ends with the raw model output.
    async fn invoke_structured<T>(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatInvokeCompletion<T>, ModelProviderError>
    where
        T: DeserializeOwned + Send;
}

#[async_trait]
impl<C: LLMClient + ?Sized> LLMClientExt for C {
    async fn invoke_structured<T>(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatInvokeCompletion<T>, ModelProviderError>
    where
        T: DeserializeOwned + Send,
    {
        let raw = self.invoke(messages).await?;
        let completion = parser::try_parse_output::<T>(&raw.completion)
            .map_err(|e| ModelProviderError::from_parse(e, &raw.completion, self.name()))?;

        Ok(ChatInvokeCompletion {
            completion,
            usage: raw.usage,
        })
    }
}

/// Result of a single completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatInvokeCompletion<T> {
    /// Raw text, or the caller's structure for structured calls
    pub completion: T,
    /// Token accounting, when the provider reports it
    pub usage: Option<ChatInvokeUsage>,
}

/// Token usage reported by a provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatInvokeUsage {
    pub prompt_tokens: u32,
    pub prompt_cached_tokens: Option<u32>,
    pub prompt_cache_creation_tokens: Option<u32>,
    pub prompt_image_tokens: Option<u32>,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// What went wrong during a completion call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Network fault, non-success status or undecodable response body
    Transport,
    /// No JSON-like text in the model output
    Extraction,
    /// JSON syntax error that survived repair
    Parse,
    /// Valid JSON rejected by the target structure
    Validation,
}

/// Uniform error returned by every provider
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ModelProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    /// HTTP status, when the failure came from a response
    pub status_code: Option<u16>,
    /// Model identifier used for the call
    pub model: String,
}

impl ModelProviderError {
    pub fn transport(
        message: impl Into<String>,
        status_code: Option<u16>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            kind: ProviderErrorKind::Transport,
            message: message.into(),
            status_code,
            model: model.into(),
        }
    }

    /// Wrap a parser failure, keeping the raw output for diagnosis
    pub fn from_parse(err: ParseError, raw: &str, model: impl Into<String>) -> Self {
        let kind = match err {
            ParseError::NoJsonFound => ProviderErrorKind::Extraction,
            ParseError::InvalidJson { .. } => ProviderErrorKind::Parse,
            ParseError::Validation(_) => ProviderErrorKind::Validation,
        };

        Self {
            kind,
            message: format!(
                "Failed to parse model output as JSON: {}\nRaw response:\n{}",
                err, raw
            ),
            status_code: None,
            model: model.into(),
        }
    }
}
