//! Provider registry for managing model provider instances.
//!
//! Providers are created once at start-up and shared by every route call.

use core::time::Duration;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use genesis_core::{Error, GenesisConfig, ModelProvider, Result};
use genesis_providers::{
    ClaudeProvider, GeminiProvider, GroqProvider, OpenAiProvider, build_client,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Availability report across all registered providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    /// Availability per provider id
    pub models: BTreeMap<String, bool>,
    /// Number of available providers
    pub total_available: usize,
}

/// Registry that maps provider ids to their instances.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    /// Map from provider id to provider instance
    providers: HashMap<String, Arc<dyn ModelProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the four HTTP providers from configuration.
    ///
    /// Providers without an API key are still registered; they report
    /// themselves unavailable and fail each call.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &GenesisConfig) -> Result<Self> {
        let timeout = config
            .generation
            .request_timeout_seconds
            .map(Duration::from_secs);
        let client = build_client(timeout)?;
        let models = &config.models;

        let mut registry = Self::new();
        registry.register(Arc::new(
            ClaudeProvider::new(config.get_api_key(ClaudeProvider::ID))
                .with_model(&models.claude)
                .with_client(client.clone()),
        ));
        registry.register(Arc::new(
            OpenAiProvider::new(config.get_api_key(OpenAiProvider::ID))
                .with_model(&models.openai)
                .with_client(client.clone()),
        ));
        registry.register(Arc::new(
            GeminiProvider::new(config.get_api_key(GeminiProvider::ID))
                .with_model(&models.gemini)
                .with_client(client.clone()),
        ));
        registry.register(Arc::new(
            GroqProvider::new(config.get_api_key(GroqProvider::ID))
                .with_model(&models.groq)
                .with_client(client),
        ));

        debug!(providers = ?registry.ids(), "Provider registry initialized");
        Ok(registry)
    }

    /// Register a provider under its own name, replacing any existing entry.
    pub fn register(&mut self, provider: Arc<dyn ModelProvider>) {
        self.providers.insert(provider.name().to_owned(), provider);
    }

    /// Get the provider registered under `id`.
    ///
    /// # Errors
    /// Returns an error if no provider is registered for the id.
    pub fn get(&self, id: &str) -> Result<Arc<dyn ModelProvider>> {
        self.providers
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownProvider(id.to_owned()))
    }

    /// Registered provider ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Check availability of every registered provider.
    pub async fn status(&self) -> ProviderStatus {
        let mut models = BTreeMap::new();
        for (id, provider) in &self.providers {
            models.insert(id.clone(), provider.is_available().await);
        }
        let total_available = models.values().filter(|available| **available).count();
        ProviderStatus {
            models,
            total_available,
        }
    }
}
