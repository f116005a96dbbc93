use async_trait::async_trait;
use genesis_core::config::ENV_ANTHROPIC_API_KEY;
use genesis_core::{Completion, Error, GenerationParams, ModelProvider, Result, UsageMetrics};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{join_url, send_json};

/// Anthropic API base URL.
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
/// Messages endpoint path.
const MESSAGES_PATH: &str = "/v1/messages";
/// API version sent with every request.
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Default model for Claude.
const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// Provider implementation for the Anthropic Messages API.
pub struct ClaudeProvider {
    /// HTTP client for API requests.
    client: Client,
    /// Anthropic API key, if configured.
    api_key: Option<String>,
    /// Model name to use.
    model: String,
    /// Base URL of the API.
    base_url: String,
}

impl ClaudeProvider {
    /// Identifier of this provider in preference tables.
    pub const ID: &'static str = "claude";

    /// Creates a provider with the given API key; empty keys count as missing.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::default(),
            api_key: api_key.filter(|key| !key.is_empty()),
            model: DEFAULT_MODEL.to_owned(),
            base_url: ANTHROPIC_BASE_URL.to_owned(),
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

/// Request payload for the Messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest<'req> {
    /// Model identifier.
    model: &'req str,
    /// Maximum number of tokens to generate.
    max_tokens: u32,
    /// Sampling temperature.
    temperature: f32,
    /// Conversation turns.
    messages: Vec<MessageParam<'req>>,
}

/// A single conversation turn.
#[derive(Debug, Serialize)]
struct MessageParam<'req> {
    /// Author role.
    role: &'req str,
    /// Turn text.
    content: &'req str,
}

/// Response payload of the Messages API.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    /// Content blocks; only `text` blocks carry generated text.
    #[serde(default)]
    content: Vec<ContentBlock>,
    /// Token accounting.
    usage: Option<MessagesUsage>,
}

/// One block of response content.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    /// Block type, e.g. `text`.
    #[serde(rename = "type")]
    kind: String,
    /// Text of a `text` block.
    #[serde(default)]
    text: String,
}

/// Token usage reported by Anthropic.
#[derive(Debug, Deserialize)]
struct MessagesUsage {
    /// Input tokens.
    input_tokens: u64,
    /// Output tokens.
    output_tokens: u64,
}

#[async_trait]
impl ModelProvider for ClaudeProvider {
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
            .ok_or_else(|| Error::MissingApiKey(ENV_ANTHROPIC_API_KEY.to_owned()))?;

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            messages: vec![MessageParam {
                role: "user",
                content: prompt,
            }],
        };

        let response: MessagesResponse = send_json(
            self.client
                .post(join_url(&self.base_url, MESSAGES_PATH))
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&request),
            "Claude",
        )
        .await?;

        let text = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect::<String>();

        if text.is_empty() {
            return Err(Error::InvalidResponse(
                "No text in Claude response".to_owned(),
            ));
        }

        let usage = response.usage.map_or_else(UsageMetrics::new, |usage| {
            UsageMetrics::from([
                ("input_tokens".to_owned(), Value::from(usage.input_tokens)),
                ("output_tokens".to_owned(), Value::from(usage.output_tokens)),
            ])
        });

        Ok(Completion::new(text, &self.model).with_usage(usage))
    }
}
