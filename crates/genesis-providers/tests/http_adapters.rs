//! Wire-level tests for the HTTP provider adapters against a local mock server.
#![cfg_attr(
    test,
    allow(
        clippy::tests_outside_test_module,
        clippy::missing_panics_doc,
        clippy::unwrap_used,
        reason = "Test file allows"
    )
)]

use genesis_core::{GenerationParams, GenerationResult, ModelProvider as _};
use genesis_providers::{ClaudeProvider, GeminiProvider, GroqProvider, OpenAiProvider};
use httpmock::prelude::*;
use serde_json::json;

fn params() -> GenerationParams {
    GenerationParams {
        max_tokens: 128,
        temperature: 0.2,
    }
}

#[tokio::test]
async fn claude_sends_messages_request_and_reads_usage() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", "sk-ant-test")
                .header("anthropic-version", "2023-06-01")
                .body_contains("\"max_tokens\":128")
                .body_contains("\"content\":\"write a parser\"");
            then.status(200).json_body(json!({
                "id": "msg_1",
                "content": [{"type": "text", "text": "Here's a parser."}],
                "usage": {"input_tokens": 11, "output_tokens": 7}
            }));
        })
        .await;

    let provider = ClaudeProvider::new(Some("sk-ant-test".to_owned())).with_base_url(server.base_url());
    let result = provider.generate("write a parser", &params()).await;
    mock.assert_async().await;

    let GenerationResult::Success {
        provider,
        model,
        content,
        usage,
    } = result
    else {
        panic!("expected a successful generation");
    };
    assert_eq!(provider, "claude");
    assert_eq!(model, "claude-3-sonnet-20240229");
    assert_eq!(content, "Here's a parser.");
    assert_eq!(usage.get("input_tokens"), Some(&json!(11)));
    assert_eq!(usage.get("output_tokens"), Some(&json!(7)));
}

#[tokio::test]
async fn openai_uses_bearer_auth_and_reports_totals() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-openai")
                .body_contains("\"model\":\"gpt-4-turbo-preview\"");
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "done"}}],
                "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
            }));
        })
        .await;

    let provider = OpenAiProvider::new(Some("sk-openai".to_owned())).with_base_url(server.base_url());
    let result = provider.generate("hi", &params()).await;
    mock.assert_async().await;

    assert_eq!(result.content(), Some("done"));
    if let GenerationResult::Success { usage, .. } = result {
        assert_eq!(usage.get("total_tokens"), Some(&json!(4)));
    }
}

#[tokio::test]
async fn groq_computes_missing_total() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/openai/v1/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{"message": {"content": "fast"}}],
                "usage": {"prompt_tokens": 5, "completion_tokens": 2}
            }));
        })
        .await;

    let provider = GroqProvider::new(Some("gsk".to_owned())).with_base_url(server.base_url());
    let result = provider.generate("hi", &params()).await;

    assert_eq!(result.content(), Some("fast"));
    if let GenerationResult::Success { usage, .. } = result {
        assert_eq!(usage.get("total_tokens"), Some(&json!(7)));
    }
}

#[tokio::test]
async fn gemini_joins_parts_and_maps_usage_metadata() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-pro:generateContent")
                .header("x-goog-api-key", "g-key")
                .body_contains("\"maxOutputTokens\":128");
            then.status(200).json_body(json!({
                "candidates": [{"content": {"parts": [{"text": "a"}, {"text": "b"}]}}],
                "usageMetadata": {"promptTokenCount": 2, "candidatesTokenCount": 1, "totalTokenCount": 3}
            }));
        })
        .await;

    let provider = GeminiProvider::new(Some("g-key".to_owned())).with_base_url(server.base_url());
    let result = provider.generate("hi", &params()).await;
    mock.assert_async().await;

    assert_eq!(result.content(), Some("ab"));
    if let GenerationResult::Success { usage, .. } = result {
        assert_eq!(usage.get("completion_tokens"), Some(&json!(1)));
    }
}

#[tokio::test]
async fn gemini_without_usage_metadata_reports_empty_usage() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({
                "candidates": [{"content": {"parts": [{"text": "plain"}]}}]
            }));
        })
        .await;

    let provider = GeminiProvider::new(Some("g-key".to_owned())).with_base_url(server.base_url());
    let result = provider.generate("hi", &params()).await;

    if let GenerationResult::Success { usage, .. } = result {
        assert!(usage.is_empty());
    } else {
        panic!("expected a successful generation");
    }
}

#[tokio::test]
async fn non_success_status_becomes_failed_result() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(429).body("rate limited");
        })
        .await;

    let provider = OpenAiProvider::new(Some("sk".to_owned())).with_base_url(server.base_url());
    let result = provider.generate("hi", &params()).await;

    let error = result.error().unwrap();
    assert!(error.contains("429"), "unexpected error: {error}");
    assert!(error.contains("rate limited"), "unexpected error: {error}");
    assert_eq!(result.provider(), "gpt-4");
}

#[tokio::test]
async fn malformed_body_becomes_failed_result() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).body("not json");
        })
        .await;

    let provider = ClaudeProvider::new(Some("sk".to_owned())).with_base_url(server.base_url());
    let result = provider.generate("hi", &params()).await;

    assert!(result.error().unwrap().contains("Failed to parse Claude response"));
}

#[tokio::test]
async fn empty_choices_become_failed_result() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let provider = GroqProvider::new(Some("gsk".to_owned())).with_base_url(server.base_url());
    let result = provider.generate("hi", &params()).await;

    assert_eq!(
        result.error(),
        Some("Invalid response from provider: No response from Groq")
    );
}

#[tokio::test]
async fn unreachable_host_becomes_failed_result() {
    let provider = ClaudeProvider::new(Some("sk".to_owned())).with_base_url("http://127.0.0.1:9");
    let result = provider.generate("hi", &params()).await;

    assert!(result.error().unwrap().contains("Claude API request failed"));
}
