//! Core types and traits for the genesis prompt router.
//!
//! This crate provides the task taxonomy, the provider contract, error
//! handling, and configuration shared by the provider adapters and the router.

/// Task categories used for classification and provider preference lookup.
pub mod category;
/// Configuration loading and API key resolution.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Lock helpers.
pub mod sync;
/// Trait definitions for model providers.
pub mod traits;
/// Per-call generation types.
pub mod types;

pub use category::TaskCategory;
pub use config::{ApiKeys, GenerationSettings, GenesisConfig, ModelNames, RoutingSettings};
pub use error::{Error, Result};
pub use sync::IgnoreLock;
pub use traits::ModelProvider;
pub use types::{Completion, GenerationParams, GenerationResult, UsageMetrics};
