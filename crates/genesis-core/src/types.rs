use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token accounting reported by a provider, keyed by the provider's own field names.
///
/// Empty when the backing API does not report usage.
pub type UsageMetrics = BTreeMap<String, Value>;

/// Sampling parameters passed to every provider call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum number of tokens the provider may generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 4000,
            temperature: 0.7,
        }
    }
}

/// Text produced by a successful provider request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text
    pub content: String,
    /// Upstream model that produced the text
    pub model: String,
    /// Usage reported alongside the text
    pub usage: UsageMetrics,
}

impl Completion {
    /// Creates a completion with no usage metrics.
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: UsageMetrics::new(),
        }
    }

    /// Attaches usage metrics.
    #[must_use]
    pub fn with_usage(mut self, usage: UsageMetrics) -> Self {
        self.usage = usage;
        self
    }
}

/// Outcome of a single provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// The provider returned text.
    Success {
        /// Provider identifier
        provider: String,
        /// Upstream model name
        model: String,
        /// Generated text
        content: String,
        /// Usage reported by the provider
        usage: UsageMetrics,
    },
    /// The call failed before producing usable text.
    Failure {
        /// Provider identifier
        provider: String,
        /// Upstream model name
        model: String,
        /// Human readable failure description
        error: String,
    },
}

impl GenerationResult {
    /// Builds a success result from a completion.
    pub fn from_completion(provider: impl Into<String>, completion: Completion) -> Self {
        Self::Success {
            provider: provider.into(),
            model: completion.model,
            content: completion.content,
            usage: completion.usage,
        }
    }

    /// Builds a failure result.
    pub fn failure(
        provider: impl Into<String>,
        model: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self::Failure {
            provider: provider.into(),
            model: model.into(),
            error: error.into(),
        }
    }

    /// Whether the call produced text.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Provider identifier the result came from.
    pub fn provider(&self) -> &str {
        match self {
            Self::Success { provider, .. } | Self::Failure { provider, .. } => provider,
        }
    }

    /// Generated text, present only on success.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Success { content, .. } => Some(content),
            Self::Failure { .. } => None,
        }
    }

    /// Failure description, present only on failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_params() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 4000);
        assert!((params.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_success_accessors() {
        let mut usage = UsageMetrics::new();
        usage.insert("input_tokens".to_owned(), json!(12));
        let result = GenerationResult::from_completion(
            "claude",
            Completion::new("hello", "claude-3").with_usage(usage),
        );

        assert!(result.is_success());
        assert_eq!(result.provider(), "claude");
        assert_eq!(result.content(), Some("hello"));
        assert_eq!(result.error(), None);
        if let GenerationResult::Success { model, usage, .. } = result {
            assert_eq!(model, "claude-3");
            assert_eq!(usage.get("input_tokens"), Some(&json!(12)));
        }
    }

    #[test]
    fn test_failure_accessors() {
        let result = GenerationResult::failure("groq", "llama", "rate limited");

        assert!(!result.is_success());
        assert_eq!(result.provider(), "groq");
        assert_eq!(result.content(), None);
        assert_eq!(result.error(), Some("rate limited"));
        assert_eq!(
            result,
            GenerationResult::Failure {
                provider: "groq".to_owned(),
                model: "llama".to_owned(),
                error: "rate limited".to_owned(),
            }
        );
    }
}
