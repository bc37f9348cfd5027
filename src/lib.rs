//! # llm-bridge
//!
//! A uniform chat-completion interface over LLM providers, with a local
//! [Ollama](https://ollama.com) backend and best-effort recovery of JSON from
//! free-form model output.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use llm_bridge::llm::{ChatMessage, LLMClient, OllamaClient, OllamaConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OllamaClient::new(OllamaConfig::new("llama3:latest").with_temperature(0.2));
//!
//!     let reply = client
//!         .invoke(&[
//!             ChatMessage::system("You are a terse assistant."),
//!             ChatMessage::user("Name a prime number."),
//!         ])
//!         .await?;
//!     println!("{}", reply.completion);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Structured Output
//!
//! Any client gets [`LLMClientExt::invoke_structured`], which repairs the
//! model's JSON (markdown fences, surrounding prose, trailing commas) before
//! deserializing it:
//!
//! ```rust,ignore
//! use llm_bridge::llm::LLMClientExt;
//!
//! #[derive(serde::Deserialize)]
//! struct Answer { value: u32 }
//!
//! let answer = client.invoke_structured::<Answer>(&messages).await?;
//! ```
//!
//! ### Configuration-Driven Setup
//!
//! ```rust,ignore
//! use llm_bridge::LlmBridgeConfig;
//!
//! let config = LlmBridgeConfig::load("llm-bridge.toml")?;
//! let client = config.provider(None)?.create_client()?;
//! ```
//!
//! ## Modules
//!
//! - [`llm`] - Provider trait, messages, Ollama client, output repair
//! - [`utils`] - TOML configuration
//! - [`cli`] - Command-line definition for the `llm-bridge` binary
//! - [`types`] - Crate-level error handling

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Command-line interface definition.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Crate-level errors.
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;

// Re-export commonly used types
pub use llm::{
    ChatInvokeCompletion, ChatInvokeUsage, ChatMessage, LLMClient, LLMClientExt,
    ModelProviderError, OllamaClient, OllamaConfig, ProviderErrorKind, Role,
};
pub use types::{AppError, Result};
pub use utils::toml_config::{ConfigError, LlmBridgeConfig, ProviderConfig};
