//! Provider adapters for external LLM services.

/// Anthropic Claude provider implementation.
pub mod claude;
/// Google Gemini provider implementation.
pub mod gemini;
/// Groq provider implementation.
pub mod groq;
/// Shared HTTP plumbing.
mod http;
/// Scripted provider for tests.
pub mod mock;
/// Request and response shapes shared by OpenAI-compatible APIs.
mod openai_compat;
/// `OpenAI` provider implementation.
pub mod openai;

pub use claude::ClaudeProvider;
pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use http::build_client;
pub use mock::{MockProvider, MockReply};
pub use openai::OpenAiProvider;
