use async_trait::async_trait;
use tracing::debug;

use crate::{Completion, GenerationParams, GenerationResult, Result};

/// Trait for remote text-generation services.
///
/// The router only depends on this contract, so new providers (or test doubles)
/// can be added without touching routing code.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Returns the identifier used for this provider in preference tables.
    fn name(&self) -> &str;

    /// Returns the upstream model this provider sends requests to.
    fn model(&self) -> &str;

    /// Checks whether this provider is configured and ready to accept requests.
    ///
    /// Must not perform fallible work that could surface as an error.
    async fn is_available(&self) -> bool;

    /// Sends the prompt to the remote service.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails,
    /// or the response cannot be decoded.
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<Completion>;

    /// Sends the prompt and folds any error into a [`GenerationResult::Failure`].
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> GenerationResult {
        match self.complete(prompt, params).await {
            Ok(completion) => GenerationResult::from_completion(self.name(), completion),
            Err(error) => {
                debug!(provider = self.name(), %error, "provider call failed");
                GenerationResult::failure(self.name(), self.model(), error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct FixedProvider {
        reply: Option<&'static str>,
    }

    #[async_trait]
    impl ModelProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn model(&self) -> &str {
            "fixed-1"
        }

        async fn is_available(&self) -> bool {
            self.reply.is_some()
        }

        async fn complete(&self, _prompt: &str, _params: &GenerationParams) -> Result<Completion> {
            self.reply
                .map(|text| Completion::new(text, "fixed-1"))
                .ok_or_else(|| Error::MissingApiKey("FIXED_API_KEY".to_owned()))
        }
    }

    #[tokio::test]
    async fn test_generate_wraps_success() {
        let provider = FixedProvider { reply: Some("ok") };
        let result = provider.generate("hi", &GenerationParams::default()).await;

        assert_eq!(result.content(), Some("ok"));
        assert_eq!(result.provider(), "fixed");
    }

    #[tokio::test]
    async fn test_generate_folds_errors() {
        let provider = FixedProvider { reply: None };
        let result = provider.generate("hi", &GenerationParams::default()).await;

        assert!(!result.is_success());
        assert_eq!(result.error(), Some("API key not configured: FIXED_API_KEY"));
        assert!(!provider.is_available().await);
    }
}
