//! LLM Provider Clients and Abstractions
//!
//! This module provides a unified interface for chat completion across
//! LLM providers. Provider-specific wire formats stay behind the
//! [`LLMClient`] trait, so the rest of an application only deals with
//! [`ChatMessage`]s in and [`ChatInvokeCompletion`]s out.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all providers implement
//! - [`LLMClientExt`] - Structured output for any client via [`parser`]
//! - [`ProviderConfig`](crate::utils::toml_config::ProviderConfig) - Creates clients from `llm-bridge.toml`
//!
//! # Supported Providers
//!
//! - `ollama` - Local Ollama server (`/api/generate`), see [`OllamaClient`]
//!
//! # Example
//!
//! ```ignore
//! use llm_bridge::llm::{ChatMessage, LLMClientExt, OllamaClient, OllamaConfig};
//!
//! #[derive(serde::Deserialize)]
//! struct Sentiment { label: String, score: f64 }
//!
//! let client = OllamaClient::new(OllamaConfig::default());
//! let result = client
//!     .invoke_structured::<Sentiment>(&[
//!         ChatMessage::system("Reply with JSON: {\"label\": ..., \"score\": ...}"),
//!         ChatMessage::user("I love this!"),
//!     ])
//!     .await?;
//! println!("{} ({})", result.completion.label, result.completion.score);
//! ```

/// Core LLM client trait, completion types and the provider error.
pub mod client;
/// Conversation message types and prompt serialization.
pub mod messages;
/// JSON recovery from free-form model output.
pub mod parser;

/// Ollama backend.
pub mod ollama;

pub use client::{
    ChatInvokeCompletion, ChatInvokeUsage, LLMClient, LLMClientExt, ModelProviderError,
    ProviderErrorKind,
};
pub use messages::{serialize_messages, ChatMessage, ContentPart, MessageContent, Role};
pub use parser::ParseError;

pub use ollama::{OllamaClient, OllamaConfig};
