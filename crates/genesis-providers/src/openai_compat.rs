use genesis_core::{Completion, Error, GenerationParams, Result, UsageMetrics};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::send_json;

/// Request payload for a chat completion endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'req> {
    /// Model identifier provided by the service.
    model: &'req str,
    /// Conversation; a single user turn for routed prompts.
    messages: Vec<ChatMessage<'req>>,
    /// Sampling temperature controlling response randomness.
    temperature: f32,
    /// Maximum number of tokens allowed in the completion.
    max_tokens: u32,
}

/// Message delivered to the API.
#[derive(Debug, Serialize)]
struct ChatMessage<'req> {
    /// Role of the message author.
    role: &'req str,
    /// Textual content of the message.
    content: &'req str,
}

/// Response payload of a chat completion endpoint.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// List of candidate completions.
    #[serde(default)]
    choices: Vec<ChatChoice>,
    /// Token accounting, when reported.
    usage: Option<ChatUsage>,
}

/// A single completion choice.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// Message generated for the choice.
    message: ChatResponseMessage,
}

/// Response message containing the generated text.
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    /// Generated text content; null for tool-only replies.
    content: Option<String>,
}

/// Token usage metrics.
#[derive(Debug, Deserialize)]
struct ChatUsage {
    /// Tokens in the prompt.
    #[serde(rename = "prompt_tokens")]
    prompt: u64,
    /// Tokens in the completion.
    #[serde(rename = "completion_tokens")]
    completion: u64,
    /// Total tokens, when the service reports it.
    #[serde(rename = "total_tokens")]
    total: Option<u64>,
}

impl ChatUsage {
    fn into_metrics(self) -> UsageMetrics {
        let total = self.total.unwrap_or(self.prompt + self.completion);
        UsageMetrics::from([
            ("prompt_tokens".to_owned(), Value::from(self.prompt)),
            ("completion_tokens".to_owned(), Value::from(self.completion)),
            ("total_tokens".to_owned(), Value::from(total)),
        ])
    }
}

/// Sends a single-turn chat completion and extracts the first choice.
///
/// # Errors
/// Returns an error if the request fails or the response holds no text.
pub async fn chat_completion(
    client: &Client,
    url: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
    params: &GenerationParams,
    service: &str,
) -> Result<Completion> {
    let request = ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
        temperature: params.temperature,
        max_tokens: params.max_tokens,
    };

    let response: ChatResponse = send_json(
        client.post(url).bearer_auth(api_key).json(&request),
        service,
    )
    .await?;

    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| Error::InvalidResponse(format!("No response from {service}")))?;

    let usage = response
        .usage
        .map_or_else(UsageMetrics::new, ChatUsage::into_metrics);

    Ok(Completion::new(text, model).with_usage(usage))
}
