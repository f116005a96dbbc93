//! Ordered provider preferences per task category.

use std::collections::HashMap;

use genesis_core::{Error, Result, RoutingSettings, TaskCategory};

/// Providers tried when a category has no entry.
pub const FALLBACK_PROVIDERS: &[&str] = &["claude", "gpt-4"];

/// Mapping from task category to the provider ids to try, most preferred first.
///
/// Built once at start-up and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceTable {
    /// Provider order per category
    entries: HashMap<TaskCategory, Vec<String>>,
}

impl Default for PreferenceTable {
    fn default() -> Self {
        Self::defaults()
    }
}

impl PreferenceTable {
    /// The built-in preference order.
    #[must_use]
    pub fn defaults() -> Self {
        let entries = TaskCategory::ALL
            .into_iter()
            .map(|category| {
                let providers = default_providers(category)
                    .iter()
                    .map(|id| (*id).to_owned())
                    .collect();
                (category, providers)
            })
            .collect();
        Self { entries }
    }

    /// Defaults with per-category overrides from configuration applied.
    ///
    /// # Errors
    /// Returns an error if an override names an unknown category or lists no providers.
    pub fn from_settings(settings: &RoutingSettings) -> Result<Self> {
        let mut table = Self::defaults();
        for (key, providers) in &settings.preferences {
            let category: TaskCategory = key.parse().map_err(|_| {
                Error::Config(format!("Unknown task category in preferences: {key}"))
            })?;
            table.set(category, providers.clone())?;
        }
        Ok(table)
    }

    /// Replaces the provider order for one category.
    ///
    /// # Errors
    /// Returns an error if `providers` is empty.
    pub fn set(&mut self, category: TaskCategory, providers: Vec<String>) -> Result<()> {
        if providers.is_empty() {
            return Err(Error::Config(format!(
                "Preference list for {category} must name at least one provider"
            )));
        }
        self.entries.insert(category, providers);
        Ok(())
    }

    /// Provider ids for `category`, falling back to [`FALLBACK_PROVIDERS`].
    pub fn providers_for(&self, category: TaskCategory) -> Vec<&str> {
        self.entries.get(&category).map_or_else(
            || FALLBACK_PROVIDERS.to_vec(),
            |providers| providers.iter().map(String::as_str).collect(),
        )
    }
}

const fn default_providers(category: TaskCategory) -> &'static [&'static str] {
    match category {
        TaskCategory::CreativeUi | TaskCategory::CodeGeneration => &["claude", "gpt-4", "gemini"],
        TaskCategory::Debugging => &["gpt-4", "claude"],
        TaskCategory::FastSimple => &["groq", "claude"],
        TaskCategory::Multimodal => &["gemini", "gpt-4"],
        TaskCategory::Architecture
        | TaskCategory::Modeling3d
        | TaskCategory::Planning
        | TaskCategory::Refactoring => FALLBACK_PROVIDERS,
    }
}
