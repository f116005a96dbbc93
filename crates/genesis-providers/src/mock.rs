//! Mock provider for testing routing behaviour.
//!
//! Replies are scripted per call, so tests can drive the router through
//! success, low-quality and failure paths without real API calls.

use async_trait::async_trait;
use genesis_core::{
    Completion, Error, GenerationParams, IgnoreLock as _, ModelProvider, Result, UsageMetrics,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One scripted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Return this text.
    Text(String),
    /// Fail with this provider error message.
    Error(String),
}

/// Mock provider that returns scripted replies in order.
///
/// Clones share their script and call history, so a test can keep one handle
/// and hand another to the router.
#[derive(Clone)]
pub struct MockProvider {
    /// Identifier of this mock provider
    name: String,
    /// Reported model name
    model: String,
    /// Value returned by the availability check
    available: bool,
    /// Replies consumed one per call
    script: Arc<Mutex<VecDeque<MockReply>>>,
    /// Reply used once the script is exhausted
    default_reply: Arc<Mutex<Option<MockReply>>>,
    /// Prompts received, in call order
    call_history: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with a given identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            model: format!("{name}-mock"),
            name,
            available: true,
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_reply: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful reply.
    #[must_use]
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.script
            .lock_ignore_poison()
            .push_back(MockReply::Text(text.into()));
        self
    }

    /// Queue a failing reply.
    #[must_use]
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.script
            .lock_ignore_poison()
            .push_back(MockReply::Error(message.into()));
        self
    }

    /// Reply with `text` whenever the script is empty.
    #[must_use]
    pub fn with_default_reply(self, text: impl Into<String>) -> Self {
        *self.default_reply.lock_ignore_poison() = Some(MockReply::Text(text.into()));
        self
    }

    /// Fail with `message` whenever the script is empty.
    #[must_use]
    pub fn with_default_error(self, message: impl Into<String>) -> Self {
        *self.default_reply.lock_ignore_poison() = Some(MockReply::Error(message.into()));
        self
    }

    /// Make the availability check report `false`.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Clear the call history.
    pub fn clear_history(&self) {
        self.call_history.lock_ignore_poison().clear();
    }

    /// Get the call history (list of all prompts received).
    #[must_use]
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock_ignore_poison().clone()
    }

    /// Get the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_history.lock_ignore_poison().len()
    }

    /// Pop the next scripted reply, falling back to the default.
    fn next_reply(&self, prompt: &str) -> MockReply {
        let scripted = self.script.lock_ignore_poison().pop_front();
        if let Some(reply) = scripted {
            return reply;
        }
        self.default_reply
            .lock_ignore_poison()
            .clone()
            .unwrap_or_else(|| MockReply::Text(format!("Mock response for: {prompt}")))
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn complete(&self, prompt: &str, _params: &GenerationParams) -> Result<Completion> {
        self.call_history.lock_ignore_poison().push(prompt.to_owned());

        match self.next_reply(prompt) {
            MockReply::Text(text) => {
                let usage = UsageMetrics::from([(
                    "input_tokens".to_owned(),
                    Value::from(prompt.len() as u64),
                )]);
                Ok(Completion::new(text, &self.model).with_usage(usage))
            }
            MockReply::Error(message) => Err(Error::Provider(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests scripted replies are consumed in order before the default.
    ///
    /// # Panics
    /// Panics if assertions fail during test execution.
    #[tokio::test]
    async fn test_mock_provider_script_order() {
        let provider = MockProvider::new("test")
            .with_reply("first")
            .with_error("second failed")
            .with_default_reply("fallback");
        let params = GenerationParams::default();

        let first = provider.generate("a", &params).await;
        assert_eq!(first.content(), Some("first"));

        let second = provider.generate("b", &params).await;
        assert_eq!(second.error(), Some("Provider error: second failed"));

        let third = provider.generate("c", &params).await;
        assert_eq!(third.content(), Some("fallback"));
    }

    /// Tests the built-in reply when nothing is scripted.
    ///
    /// # Panics
    /// Panics if assertions fail during test execution.
    #[tokio::test]
    async fn test_mock_provider_unscripted_reply() {
        let provider = MockProvider::new("test");
        let result = provider
            .generate("unmatched", &GenerationParams::default())
            .await;
        assert_eq!(result.content(), Some("Mock response for: unmatched"));
    }

    /// Tests call history is shared across clones.
    ///
    /// # Panics
    /// Panics if assertions fail during test execution.
    #[tokio::test]
    async fn test_mock_provider_call_history() {
        let provider = MockProvider::new("test");
        let handle = provider.clone();
        let params = GenerationParams::default();

        provider.generate("first query", &params).await;
        provider.generate("second query", &params).await;

        let history = handle.call_history();
        assert_eq!(history, vec!["first query", "second query"]);

        handle.clear_history();
        assert_eq!(provider.call_count(), 0);
    }

    /// Tests the availability switch.
    ///
    /// # Panics
    /// Panics if assertions fail during test execution.
    #[tokio::test]
    async fn test_mock_provider_unavailable() {
        assert!(MockProvider::new("up").is_available().await);
        assert!(!MockProvider::new("down").unavailable().is_available().await);
    }
}
