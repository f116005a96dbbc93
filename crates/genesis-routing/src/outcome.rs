//! Route requests, outcomes and their JSON wire form.

use genesis_core::{Error, Result, TaskCategory, UsageMetrics};
use serde::{Deserialize, Serialize};

/// Caller input for a single route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    /// Free-text prompt
    pub prompt: String,
    /// Explicit category; bypasses classification when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    /// Number of rounds over the preferred providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

impl RouteRequest {
    /// Creates a request with default category and attempts.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            category: None,
            max_attempts: None,
        }
    }

    /// Sets an explicit category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the number of rounds.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Checks the request before routing.
    ///
    /// # Errors
    /// Returns an error if the prompt is blank or `max_attempts` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(Error::InvalidRequest("prompt must not be empty".to_owned()));
        }
        if self.max_attempts == Some(0) {
            return Err(Error::InvalidRequest(
                "maxAttempts must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Final result of routing one prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "RouteResponse")]
pub enum RouteOutcome {
    /// A provider produced an answer.
    Success {
        /// Generated text
        content: String,
        /// Provider that produced it
        provider: String,
        /// Upstream model name
        model: String,
        /// Category used for routing
        category: TaskCategory,
        /// Heuristic score of the accepted answer
        quality_score: f64,
        /// Round in which the answer was produced
        attempts: u32,
        /// Usage reported by the provider
        usage: UsageMetrics,
    },
    /// Every provider call failed.
    Failure {
        /// Aggregate failure message
        error: String,
        /// Category used for routing
        category: TaskCategory,
        /// Rounds run
        attempts: u32,
    },
}

impl RouteOutcome {
    /// Whether a provider answered.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Category used for routing.
    pub const fn category(&self) -> TaskCategory {
        match self {
            Self::Success { category, .. } | Self::Failure { category, .. } => *category,
        }
    }

    /// Rounds reported for this outcome.
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Success { attempts, .. } | Self::Failure { attempts, .. } => *attempts,
        }
    }

    /// Generated text on success.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Success { content, .. } => Some(content),
            Self::Failure { .. } => None,
        }
    }

    /// Answering provider on success.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Success { provider, .. } => Some(provider),
            Self::Failure { .. } => None,
        }
    }

    /// Quality score on success.
    pub const fn quality_score(&self) -> Option<f64> {
        match self {
            Self::Success { quality_score, .. } => Some(*quality_score),
            Self::Failure { .. } => None,
        }
    }

    /// Failure message.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

/// Flat JSON shape of a [`RouteOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Whether a provider answered
    pub success: bool,
    /// Generated text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Answering provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Upstream model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Category used for routing
    pub category: TaskCategory,
    /// Heuristic score of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    /// Rounds reported for the outcome
    pub attempts: u32,
    /// Usage reported by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetrics>,
    /// Aggregate failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RouteOutcome> for RouteResponse {
    fn from(outcome: RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::Success {
                content,
                provider,
                model,
                category,
                quality_score,
                attempts,
                usage,
            } => Self {
                success: true,
                content: Some(content),
                provider: Some(provider),
                model: Some(model),
                category,
                quality_score: Some(quality_score),
                attempts,
                usage: Some(usage),
                error: None,
            },
            RouteOutcome::Failure {
                error,
                category,
                attempts,
            } => Self {
                success: false,
                content: None,
                provider: None,
                model: None,
                category,
                quality_score: None,
                attempts,
                usage: None,
                error: Some(error),
            },
        }
    }
}
