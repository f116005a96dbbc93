use async_trait::async_trait;
use genesis_core::config::ENV_GROQ_API_KEY;
use genesis_core::{Completion, Error, GenerationParams, ModelProvider, Result};
use reqwest::Client;

use crate::http::join_url;
use crate::openai_compat::chat_completion;

/// Groq API base URL.
const GROQ_BASE_URL: &str = "https://api.groq.com";
/// Chat completion path on the OpenAI-compatible surface.
const GROQ_CHAT_PATH: &str = "/openai/v1/chat/completions";
/// Default model for Groq.
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq API provider (fast inference, free tier with rate limits).
pub struct GroqProvider {
    /// HTTP client for API requests.
    client: Client,
    /// Groq API key, if configured.
    api_key: Option<String>,
    /// Model name to use.
    model: String,
    /// Base URL of the API.
    base_url: String,
}

impl GroqProvider {
    /// Identifier of this provider in preference tables.
    pub const ID: &'static str = "groq";

    /// Creates a provider with the given API key; empty keys count as missing.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::default(),
            api_key: api_key.filter(|key| !key.is_empty()),
            model: DEFAULT_MODEL.to_owned(),
            base_url: GROQ_BASE_URL.to_owned(),
        }
    }

    /// Sets the model to use for generation.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the provider at a different API host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Uses a preconfigured HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl ModelProvider for GroqProvider {
    fn name(&self) -> &str {
        Self::ID
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<Completion> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::MissingApiKey(ENV_GROQ_API_KEY.to_owned()))?;

        chat_completion(
            &self.client,
            &join_url(&self.base_url, GROQ_CHAT_PATH),
            api_key,
            &self.model,
            prompt,
            params,
            "Groq",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groq_provider_with_api_key() {
        let provider = GroqProvider::new(Some("test_key".to_owned()));

        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn empty_key_is_unavailable() {
        let provider = GroqProvider::new(Some(String::new()));
        assert!(!provider.is_available().await);

        let result = provider
            .generate("hello", &GenerationParams::default())
            .await;
        assert_eq!(result.error(), Some("API key not configured: GROQ_API_KEY"));
    }

    #[test]
    fn test_model_chaining() {
        let provider = GroqProvider::new(None)
            .with_model("mixtral-8x7b-32768")
            .with_base_url("http://localhost:1");

        assert_eq!(provider.model, "mixtral-8x7b-32768");
        assert_eq!(provider.base_url, "http://localhost:1");
    }
}
