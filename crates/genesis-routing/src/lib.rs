//! Heuristic prompt routing across LLM providers.
//!
//! A prompt is classified into a [`TaskCategory`](genesis_core::TaskCategory),
//! augmented with category guidance, and sent to the category's preferred
//! providers in order until an answer clears the quality threshold.

/// Keyword-based task classification.
pub mod classifier;
/// Category-specific prompt guidance.
pub mod enhancer;
/// Route requests and outcomes.
pub mod outcome;
/// Provider order per category.
pub mod preferences;
/// Heuristic answer quality scoring.
pub mod quality;
/// Provider instances by id.
pub mod registry;
/// The fallback router.
pub mod router;

pub use classifier::classify;
pub use enhancer::enhance;
pub use outcome::{RouteOutcome, RouteRequest, RouteResponse};
pub use preferences::{FALLBACK_PROVIDERS, PreferenceTable};
pub use quality::{QUALITY_THRESHOLD, score};
pub use registry::{ProviderRegistry, ProviderStatus};
pub use router::{DEFAULT_MAX_ATTEMPTS, SmartRouter};
