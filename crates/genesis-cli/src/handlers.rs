//! Command handlers for CLI operations

use std::io::stderr;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use genesis_core::{GenesisConfig, TaskCategory};
use genesis_routing::{RouteRequest, RouteResponse, SmartRouter, classify, enhance};
use serde_json::to_string_pretty;
use tracing::warn;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "genesis_routing=info,genesis_providers=info";
/// Filter used with `--verbose`.
const VERBOSE_FILTER: &str = "genesis_routing=debug,genesis_providers=debug,genesis_core=debug";

/// Install the stderr tracing subscriber.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
    };

    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(stderr)
                .with_target(true)
                .with_level(true),
        )
        .init();
}

/// Load the configuration from `path`, or from `~/.genesis/config.toml`.
///
/// An explicit path must load; the default location falls back to defaults
/// with a warning.
///
/// # Errors
/// Returns an error if an explicit config file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<GenesisConfig> {
    if let Some(path) = path {
        return GenesisConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    Ok(GenesisConfig::load_or_create().unwrap_or_else(|error| {
        warn!("Failed to load config from ~/.genesis/config.toml: {error}");
        warn!("Using default configuration");
        GenesisConfig::default()
    }))
}

/// Route a prompt and print the outcome as JSON.
///
/// Returns whether a provider answered.
///
/// # Errors
/// Returns an error if the router cannot be built or the request is invalid.
pub async fn handle_route(
    config: &GenesisConfig,
    prompt: String,
    category: Option<TaskCategory>,
    max_attempts: Option<u32>,
) -> Result<bool> {
    let router = SmartRouter::from_config(config)?;

    let mut request = RouteRequest::new(prompt);
    request.category = category;
    request.max_attempts = max_attempts;

    let outcome = router.route_request(&request).await?;
    let success = outcome.is_success();
    print_json(&to_string_pretty(&RouteResponse::from(outcome))?);
    Ok(success)
}

/// Print the category and enhanced prompt.
pub fn handle_classify(prompt: &str) {
    let category = classify(prompt);
    let enhanced = enhance(prompt, category);

    #[allow(clippy::print_stdout, reason = "Command output")]
    {
        println!("Category: {category}");
        println!();
        println!("{enhanced}");
    }
}

/// Print provider availability as JSON.
///
/// # Errors
/// Returns an error if the router cannot be built.
pub async fn handle_status(config: &GenesisConfig) -> Result<()> {
    let router = SmartRouter::from_config(config)?;
    let status = router.provider_status().await;
    print_json(&to_string_pretty(&status)?);
    Ok(())
}

/// Write a default config file and print its path.
///
/// # Errors
/// Returns an error if the file exists without `force` or cannot be written.
pub fn handle_init_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => GenesisConfig::config_path()?,
    };

    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    GenesisConfig::default().save_to_file(&path)?;

    #[allow(clippy::print_stdout, reason = "Command output")]
    {
        println!("{}", path.display());
    }
    Ok(path)
}

fn print_json(json: &str) {
    #[allow(clippy::print_stdout, reason = "Command output")]
    {
        println!("{json}");
    }
}
