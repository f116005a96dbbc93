//! Configuration for provider credentials, model names, sampling and routing.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use toml::{from_str, to_string_pretty};
use tracing::debug;

use crate::{Error, GenerationParams, Result};

/// Env var holding the Anthropic API key.
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
/// Env var holding the `OpenAI` API key.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Env var holding the Gemini API key.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Alternate env var for the Gemini API key.
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
/// Env var holding the Groq API key.
pub const ENV_GROQ_API_KEY: &str = "GROQ_API_KEY";

/// Env vars consulted, in order, per provider.
const ANTHROPIC_ENV_VARS: &[&str] = &[ENV_ANTHROPIC_API_KEY];
const OPENAI_ENV_VARS: &[&str] = &[ENV_OPENAI_API_KEY];
const GEMINI_ENV_VARS: &[&str] = &[ENV_GEMINI_API_KEY, ENV_GOOGLE_API_KEY];
const GROQ_ENV_VARS: &[&str] = &[ENV_GROQ_API_KEY];

/// Complete genesis configuration.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    /// API keys for model providers
    pub api_keys: ApiKeys,
    /// Upstream model name per provider
    pub models: ModelNames,
    /// Sampling parameters for every provider call
    pub generation: GenerationSettings,
    /// Router behaviour
    pub routing: RoutingSettings,
}

/// API keys for model providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    /// Anthropic key used by the `claude` provider
    pub anthropic_api_key: Option<String>,
    /// `OpenAI` key used by the `gpt-4` provider
    pub openai_api_key: Option<String>,
    /// Google key used by the `gemini` provider
    pub gemini_api_key: Option<String>,
    /// Groq key used by the `groq` provider
    pub groq_api_key: Option<String>,
}

/// Upstream model names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelNames {
    /// Model for the `claude` provider
    pub claude: String,
    /// Model for the `gpt-4` provider
    pub openai: String,
    /// Model for the `gemini` provider
    pub gemini: String,
    /// Model for the `groq` provider
    pub groq: String,
}

impl Default for ModelNames {
    fn default() -> Self {
        Self {
            claude: "claude-3-sonnet-20240229".to_owned(),
            openai: "gpt-4-turbo-preview".to_owned(),
            gemini: "gemini-pro".to_owned(),
            groq: "llama-3.3-70b-versatile".to_owned(),
        }
    }
}

/// Sampling and transport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Optional transport timeout for each HTTP request, in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            request_timeout_seconds: None,
        }
    }
}

impl GenerationSettings {
    /// Sampling parameters derived from these settings.
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Router settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Number of passes over the preferred provider list
    pub max_attempts: u32,
    /// Per-category provider order overrides, keyed by category wire name
    pub preferences: BTreeMap<String, Vec<String>>,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            preferences: BTreeMap::new(),
        }
    }
}

impl GenesisConfig {
    /// Get the default config directory path (`~/.genesis`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_dir() -> Result<PathBuf> {
        let home = home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_owned()))?;
        Ok(home.join(".genesis"))
    }

    /// Get the default config file path (`~/.genesis/config.toml`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location, creating it with defaults if absent.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read or created
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path()?)
    }

    /// Load config from `path`, creating it with defaults if absent.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read or created
    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            let config = Self::default();
            config.save_to_file(path)?;
            Ok(config)
        }
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|error| Error::Config(format!("Failed to read {}: {error}", path.display())))?;
        let config: Self = from_str(&contents)?;

        debug!(
            "Loaded config from {:?}: anthropic={}, openai={}, gemini={}, groq={}",
            path,
            presence(config.api_keys.anthropic_api_key.as_ref()),
            presence(config.api_keys.openai_api_key.as_ref()),
            presence(config.api_keys.gemini_api_key.as_ref()),
            presence(config.api_keys.groq_api_key.as_ref()),
        );

        Ok(config)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = to_string_pretty(self)?;
        let header = "# Genesis Configuration File\n\
                      # API keys left empty here are read from the environment\n\n";

        fs::write(path, format!("{header}{contents}"))?;
        Ok(())
    }

    /// Get API key for a provider, checking config first, then environment variables.
    ///
    /// Empty keys are treated as absent.
    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        self.resolve_api_key(provider, |var| env::var(var).ok())
    }

    /// Key lookup with the environment supplied by `lookup`.
    fn resolve_api_key(
        &self,
        provider: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let keys = &self.api_keys;
        let (configured, env_vars) = match provider {
            "claude" | "anthropic" => (&keys.anthropic_api_key, ANTHROPIC_ENV_VARS),
            "gpt-4" | "openai" => (&keys.openai_api_key, OPENAI_ENV_VARS),
            "gemini" => (&keys.gemini_api_key, GEMINI_ENV_VARS),
            "groq" => (&keys.groq_api_key, GROQ_ENV_VARS),
            _ => return None,
        };

        configured
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| {
                env_vars
                    .iter()
                    .find_map(|var| lookup(var).filter(|key| !key.is_empty()))
            })
    }
}

/// Renders whether an optional secret is set without printing it.
fn presence(value: Option<&String>) -> &'static str {
    if value.is_some() { "present" } else { "missing" }
}
