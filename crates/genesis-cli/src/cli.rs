use std::path::PathBuf;

use clap::{Parser, Subcommand, value_parser};
use genesis_core::TaskCategory;

/// Command-line arguments for the genesis router
#[derive(Debug, Parser)]
#[command(name = "genesis")]
#[command(about = "Route prompts to the best-suited LLM provider", long_about = None)]
pub struct Cli {
    /// Config file to use instead of `~/.genesis/config.toml`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Route a prompt and print the outcome as JSON")]
    Route {
        #[arg(help = "The prompt to route")]
        prompt: String,

        #[arg(short, long, help = "Task category (skips classification)")]
        category: Option<TaskCategory>,

        #[arg(
            short,
            long,
            value_parser = value_parser!(u32).range(1..),
            help = "Rounds over the preferred providers"
        )]
        max_attempts: Option<u32>,
    },

    #[command(about = "Show the category and enhanced prompt without calling a provider")]
    Classify {
        #[arg(help = "The prompt to classify")]
        prompt: String,
    },

    #[command(about = "Show which providers are configured")]
    Status,

    #[command(about = "Write a default configuration file")]
    InitConfig {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_with_options() {
        let cli = Cli::try_parse_from([
            "genesis",
            "--verbose",
            "route",
            "fix my bug",
            "--category",
            "3d-modeling",
            "--max-attempts",
            "3",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Commands::Route {
            prompt,
            category,
            max_attempts,
        } = cli.command
        else {
            panic!("expected route command");
        };
        assert_eq!(prompt, "fix my bug");
        assert_eq!(category, Some(TaskCategory::Modeling3d));
        assert_eq!(max_attempts, Some(3));
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["genesis", "status", "--config", "/tmp/genesis.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/genesis.toml")));
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["genesis", "route", "x", "--category", "poetry"]).is_err());
        assert!(Cli::try_parse_from(["genesis", "route", "x", "--max-attempts", "0"]).is_err());
        assert!(Cli::try_parse_from(["genesis"]).is_err());
    }
}
