use async_trait::async_trait;
use genesis_core::config::ENV_GEMINI_API_KEY;
use genesis_core::{Completion, Error, GenerationParams, ModelProvider, Result, UsageMetrics};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{join_url, send_json};

/// Generative Language API base URL.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default model for Gemini.
const DEFAULT_MODEL: &str = "gemini-pro";

/// Provider implementation for the Google Gemini `generateContent` API.
pub struct GeminiProvider {
    /// HTTP client for API requests.
    client: Client,
    /// Google API key, if configured.
    api_key: Option<String>,
    /// Model name to use.
    model: String,
    /// Base URL of the API.
    base_url: String,
}

impl GeminiProvider {
    /// Identifier of this provider in preference tables.
    pub const ID: &'static str = "gemini";

    /// Creates a provider with the given API key; empty keys count as missing.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::default(),
            api_key: api_key.filter(|key| !key.is_empty()),
            model: DEFAULT_MODEL.to_owned(),
            base_url: GEMINI_BASE_URL.to_owned(),
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

/// Request payload for `generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'req> {
    /// Conversation turns.
    contents: Vec<RequestContent<'req>>,
    /// Sampling configuration.
    generation_config: GenerationConfig,
}

/// A conversation turn in a request.
#[derive(Debug, Serialize)]
struct RequestContent<'req> {
    /// Author role.
    role: &'req str,
    /// Parts of the turn.
    parts: Vec<RequestPart<'req>>,
}

/// A text part in a request.
#[derive(Debug, Serialize)]
struct RequestPart<'req> {
    /// Text of the part.
    text: &'req str,
}

/// Sampling configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    /// Maximum number of output tokens.
    max_output_tokens: u32,
    /// Sampling temperature.
    temperature: f32,
}

/// Response payload of `generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    /// Candidate completions.
    #[serde(default)]
    candidates: Vec<Candidate>,
    /// Token accounting, when reported.
    usage_metadata: Option<UsageMetadata>,
}

/// One candidate completion.
#[derive(Debug, Deserialize)]
struct Candidate {
    /// Candidate content; absent when the candidate was blocked.
    content: Option<CandidateContent>,
}

/// Content of a candidate.
#[derive(Debug, Deserialize)]
struct CandidateContent {
    /// Text parts.
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

/// A text part of a candidate.
#[derive(Debug, Deserialize)]
struct CandidatePart {
    /// Text of the part.
    #[serde(default)]
    text: String,
}

/// Token usage reported by Gemini.
#[derive(Debug, Deserialize)]
struct UsageMetadata {
    /// Prompt tokens.
    #[serde(default, rename = "promptTokenCount")]
    prompt: u64,
    /// Tokens across all candidates.
    #[serde(default, rename = "candidatesTokenCount")]
    candidates: u64,
    /// Total tokens.
    #[serde(default, rename = "totalTokenCount")]
    total: u64,
}

#[async_trait]
impl ModelProvider for GeminiProvider {
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
            .ok_or_else(|| Error::MissingApiKey(ENV_GEMINI_API_KEY.to_owned()))?;

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: params.max_tokens,
                temperature: params.temperature,
            },
        };

        let path = format!("/v1beta/models/{}:generateContent", self.model);
        let response: GenerateContentResponse = send_json(
            self.client
                .post(join_url(&self.base_url, &path))
                .header("x-goog-api-key", api_key)
                .json(&request),
            "Gemini",
        )
        .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| Error::InvalidResponse("No text in Gemini response".to_owned()))?;

        let usage = response
            .usage_metadata
            .map_or_else(UsageMetrics::new, |usage| {
                UsageMetrics::from([
                    ("prompt_tokens".to_owned(), Value::from(usage.prompt)),
                    (
                        "completion_tokens".to_owned(),
                        Value::from(usage.candidates),
                    ),
                    ("total_tokens".to_owned(), Value::from(usage.total)),
                ])
            });

        Ok(Completion::new(text, &self.model).with_usage(usage))
    }
}
