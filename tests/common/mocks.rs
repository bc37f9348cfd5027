//! Mock implementations for testing.
//!
//! This module provides a mock LLM client that can be used across test files
//! without a running model server.

use async_trait::async_trait;
use llm_bridge::llm::{
    serialize_messages, ChatInvokeCompletion, ChatInvokeUsage, ChatMessage, LLMClient,
    ModelProviderError,
};
use std::sync::Mutex;

/// Mock LLM client with a canned response.
///
/// Every prompt it receives is recorded so tests can assert on what a caller
/// actually sent.
///
/// # Examples
///
/// ```ignore
/// let client = MockLLMClient::new("Hello, world!");
/// let client = MockLLMClient::failing(503);
/// ```
pub struct MockLLMClient {
    response: String,
    usage: Option<ChatInvokeUsage>,
    fail_with_status: Option<u16>,
    prompts: Mutex<Vec<String>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            usage: None,
            fail_with_status: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client that also reports token usage.
    pub fn with_usage(response: &str, usage: ChatInvokeUsage) -> Self {
        Self {
            usage: Some(usage),
            ..Self::new(response)
        }
    }

    /// Create a mock client that always fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::new("")
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    fn provider(&self) -> &'static str {
        "mock"
    }

    fn name(&self) -> &str {
        "mock-model"
    }

    async fn invoke(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatInvokeCompletion<String>, ModelProviderError> {
        self.prompts
            .lock()
            .unwrap()
            .push(serialize_messages(messages));

        if let Some(status) = self.fail_with_status {
            return Err(ModelProviderError::transport(
                format!("Mock LLM failure: {}", status),
                Some(status),
                self.name(),
            ));
        }

        Ok(ChatInvokeCompletion {
            completion: self.response.clone(),
            usage: self.usage.clone(),
        })
    }
}
