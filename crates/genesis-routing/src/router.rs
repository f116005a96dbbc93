//! Multi-provider router with quality-gated fallback.

use genesis_core::{
    GenerationParams, GenerationResult, GenesisConfig, Result, TaskCategory, UsageMetrics,
};
use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::enhancer::enhance;
use crate::outcome::{RouteOutcome, RouteRequest};
use crate::preferences::PreferenceTable;
use crate::quality::{self, is_acceptable};
use crate::registry::{ProviderRegistry, ProviderStatus};

/// Rounds over the preferred providers when the caller does not say.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// A successful call kept as a best-effort candidate.
struct Answer {
    /// Provider that answered
    provider: String,
    /// Upstream model name
    model: String,
    /// Generated text
    content: String,
    /// Usage reported by the provider
    usage: UsageMetrics,
    /// Heuristic quality score
    score: f64,
}

impl Answer {
    fn into_outcome(self, category: TaskCategory, attempts: u32) -> RouteOutcome {
        RouteOutcome::Success {
            content: self.content,
            provider: self.provider,
            model: self.model,
            category,
            quality_score: self.score,
            attempts,
            usage: self.usage,
        }
    }
}

/// Routes prompts to providers by task category, falling back on failure or low quality.
///
/// Holds only shared provider handles and read-only tables, so one router
/// can serve concurrent `route` calls.
#[derive(Clone)]
pub struct SmartRouter {
    /// Provider instances by id
    registry: ProviderRegistry,
    /// Provider order per category
    preferences: PreferenceTable,
    /// Sampling parameters for every call
    params: GenerationParams,
    /// Rounds used by [`SmartRouter::route_request`] when the request has none
    default_max_attempts: u32,
}

impl SmartRouter {
    /// Creates a router over the given providers and preferences.
    #[must_use]
    pub fn new(registry: ProviderRegistry, preferences: PreferenceTable) -> Self {
        Self {
            registry,
            preferences,
            params: GenerationParams::default(),
            default_max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Builds providers, preferences and parameters from configuration.
    ///
    /// # Errors
    /// Returns an error if the preference overrides are invalid or the HTTP client fails to build.
    pub fn from_config(config: &GenesisConfig) -> Result<Self> {
        let registry = ProviderRegistry::from_config(config)?;
        let preferences = PreferenceTable::from_settings(&config.routing)?;
        Ok(Self::new(registry, preferences)
            .with_params(config.generation.params())
            .with_default_max_attempts(config.routing.max_attempts))
    }

    /// Sets the sampling parameters passed to every provider.
    #[must_use]
    pub const fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the rounds used when a request does not specify them.
    #[must_use]
    pub const fn with_default_max_attempts(mut self, max_attempts: u32) -> Self {
        self.default_max_attempts = max_attempts;
        self
    }

    /// The provider registry.
    #[must_use]
    pub const fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// The preference table.
    #[must_use]
    pub const fn preferences(&self) -> &PreferenceTable {
        &self.preferences
    }

    /// Availability of every registered provider.
    pub async fn provider_status(&self) -> ProviderStatus {
        self.registry.status().await
    }

    /// Validates a request, applies defaults and routes it.
    ///
    /// # Errors
    /// Returns an error only if the request is invalid; provider failures
    /// are reported inside the outcome.
    pub async fn route_request(&self, request: &RouteRequest) -> Result<RouteOutcome> {
        request.validate()?;
        Ok(self
            .route(
                &request.prompt,
                request.category,
                request.max_attempts.unwrap_or(self.default_max_attempts),
            )
            .await)
    }

    /// Routes `prompt` and returns the first answer scoring at or above the
    /// quality threshold.
    ///
    /// Providers are tried one at a time in preference order for up to
    /// `max_attempts` rounds (at least one). If nothing clears the threshold
    /// the highest-scoring answer of the last round that produced any answer
    /// is returned; if every call failed the outcome carries the last
    /// provider error. Empty replies count as failed calls.
    pub async fn route(
        &self,
        prompt: &str,
        category: Option<TaskCategory>,
        max_attempts: u32,
    ) -> RouteOutcome {
        let category = category.unwrap_or_else(|| classify(prompt));
        let rounds = max_attempts.max(1);
        let providers = self.preferences.providers_for(category);
        let enhanced = enhance(prompt, category);

        info!(%category, ?providers, rounds, "Routing prompt");

        let mut best: Option<Answer> = None;
        let mut last_error: Option<String> = None;

        for round in 1..=rounds {
            let mut round_best: Option<Answer> = None;

            for provider_id in &providers {
                let result = self.call(provider_id, &enhanced).await;
                let score = quality::score(&result);

                match result {
                    GenerationResult::Failure {
                        provider, error, ..
                    } => {
                        warn!(%provider, round, %error, "Provider call failed");
                        last_error = Some(error);
                    }
                    GenerationResult::Success {
                        provider, content, ..
                    } if content.trim().is_empty() => {
                        warn!(%provider, round, "Provider returned empty content");
                        last_error = Some(format!("{provider} returned an empty response"));
                    }
                    GenerationResult::Success {
                        provider,
                        model,
                        content,
                        usage,
                    } => {
                        debug!(%provider, %model, round, score, "Provider answered");
                        let answer = Answer {
                            provider,
                            model,
                            content,
                            usage,
                            score,
                        };

                        if is_acceptable(score) {
                            info!(provider = %answer.provider, score, round, "Accepted answer");
                            return answer.into_outcome(category, round);
                        }

                        if round_best
                            .as_ref()
                            .is_none_or(|current| score > current.score)
                        {
                            round_best = Some(answer);
                        }
                    }
                }
            }

            // A round with no successes keeps the previous round's candidate.
            if round_best.is_some() {
                best = round_best;
            }
        }

        if let Some(answer) = best {
            warn!(
                provider = %answer.provider,
                score = answer.score,
                "No answer met the quality threshold, returning best effort"
            );
            return answer.into_outcome(category, rounds);
        }

        let last_error = last_error.unwrap_or_else(|| "no providers configured".to_owned());
        warn!(%category, rounds, %last_error, "All providers failed");
        RouteOutcome::Failure {
            error: format!("All providers failed. Last error: {last_error}"),
            category,
            attempts: rounds,
        }
    }

    /// Calls one provider; unknown ids become failed results.
    async fn call(&self, provider_id: &str, prompt: &str) -> GenerationResult {
        match self.registry.get(provider_id) {
            Ok(provider) => provider.generate(prompt, &self.params).await,
            Err(error) => GenerationResult::failure(provider_id, "unknown", error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genesis_providers::MockProvider;
    use std::sync::Arc;

    fn router_with(providers: &[MockProvider]) -> SmartRouter {
        let mut registry = ProviderRegistry::new();
        for provider in providers {
            registry.register(Arc::new(provider.clone()));
        }
        SmartRouter::new(registry, PreferenceTable::defaults())
    }

    #[tokio::test]
    async fn test_unregistered_provider_is_a_call_failure() {
        let router = router_with(&[]);
        let outcome = router
            .route("hello", Some(TaskCategory::Debugging), 1)
            .await;

        assert_eq!(
            outcome.error(),
            Some("All providers failed. Last error: No provider registered for 'claude'")
        );
        assert_eq!(outcome.attempts(), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_runs_one_round() {
        let claude = MockProvider::new("claude").with_default_error("down");
        let gpt = MockProvider::new("gpt-4").with_default_error("down");
        let router = router_with(&[claude.clone(), gpt.clone()]);

        let outcome = router.route("hello", None, 0).await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.attempts(), 1);
        assert_eq!(claude.call_count() + gpt.call_count(), 2);
    }

    #[tokio::test]
    async fn test_enhanced_prompt_sent_to_provider() {
        let claude = MockProvider::new("claude");
        let router = router_with(&[claude.clone()]);

        router.route("hello", None, 1).await;

        let history = claude.call_history();
        assert_eq!(history.len(), 1);
        assert!(history[0].starts_with("hello\n\nWrite clean, maintainable"));
    }

    #[tokio::test]
    async fn test_route_request_applies_defaults_and_validates() {
        let claude = MockProvider::new("claude").with_default_error("down");
        let gpt = MockProvider::new("gpt-4").with_default_error("down");
        let router = router_with(&[claude, gpt]).with_default_max_attempts(3);

        let outcome = router
            .route_request(&RouteRequest::new("hello"))
            .await
            .unwrap();
        assert_eq!(outcome.attempts(), 3);

        router
            .route_request(&RouteRequest::new(""))
            .await
            .unwrap_err();
    }

    #[tokio::test]
    async fn test_best_effort_prefers_earliest_on_ties() {
        let claude = MockProvider::new("claude").with_default_reply("ok");
        let gpt = MockProvider::new("gpt-4").with_default_reply("ok");
        let router = router_with(&[claude, gpt]);

        let outcome = router
            .route("hello", Some(TaskCategory::Planning), 2)
            .await;

        assert_eq!(outcome.provider(), Some("claude"));
        assert_eq!(outcome.attempts(), 2);
    }
}
