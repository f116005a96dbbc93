use async_trait::async_trait;
use genesis_core::config::ENV_OPENAI_API_KEY;
use genesis_core::{Completion, Error, GenerationParams, ModelProvider, Result};
use reqwest::Client;

use crate::http::join_url;
use crate::openai_compat::chat_completion;

/// `OpenAI` API base URL.
const OPENAI_BASE_URL: &str = "https://api.openai.com";
/// Chat completion path.
const OPENAI_CHAT_PATH: &str = "/v1/chat/completions";
/// Default model for `OpenAI`.
const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// Provider implementation for the `OpenAI` chat completion API.
pub struct OpenAiProvider {
    /// HTTP client for API requests.
    client: Client,
    /// `OpenAI` API key, if configured.
    api_key: Option<String>,
    /// Model name to use.
    model: String,
    /// Base URL of the API.
    base_url: String,
}

impl OpenAiProvider {
    /// Identifier of this provider in preference tables.
    pub const ID: &'static str = "gpt-4";

    /// Creates a provider with the given API key; empty keys count as missing.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::default(),
            api_key: api_key.filter(|key| !key.is_empty()),
            model: DEFAULT_MODEL.to_owned(),
            base_url: OPENAI_BASE_URL.to_owned(),
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
impl ModelProvider for OpenAiProvider {
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
            .ok_or_else(|| Error::MissingApiKey(ENV_OPENAI_API_KEY.to_owned()))?;

        chat_completion(
            &self.client,
            &join_url(&self.base_url, OPENAI_CHAT_PATH),
            api_key,
            &self.model,
            prompt,
            params,
            "OpenAI",
        )
        .await
    }
}
