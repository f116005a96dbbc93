//! Genesis CLI - route prompts to the best-suited LLM provider
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Allow for tests"
    )
)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser as _;
use cli::{Cli, Commands};

mod cli;
mod handlers;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    handlers::init_logging(cli.verbose);

    match cli.command {
        Commands::Route {
            prompt,
            category,
            max_attempts,
        } => {
            let config = handlers::load_config(cli.config.as_deref())?;
            if !handlers::handle_route(&config, prompt, category, max_attempts).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Classify { prompt } => {
            handlers::handle_classify(&prompt);
        }
        Commands::Status => {
            let config = handlers::load_config(cli.config.as_deref())?;
            handlers::handle_status(&config).await?;
        }
        Commands::InitConfig { force } => {
            handlers::handle_init_config(cli.config, force)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
