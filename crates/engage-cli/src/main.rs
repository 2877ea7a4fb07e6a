mod bluesky;
mod linkedin;

use std::collections::HashSet;

use clap::{Parser, Subcommand};
use engage_core::{AppConfig, SearchTerm};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::bluesky::BlueskyCommands;
use crate::linkedin::LinkedinCommands;

#[derive(Debug, Parser)]
#[command(name = "engage-cli")]
#[command(about = "Run one engagement pass and print the JSON report")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bluesky term search and follower scan
    Bluesky {
        #[command(subcommand)]
        command: BlueskyCommands,
    },
    /// LinkedIn term search
    Linkedin {
        #[command(subcommand)]
        command: LinkedinCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = engage_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Bluesky { command } => bluesky::run(&config, command).await,
        Commands::Linkedin { command } => linkedin::run(&config, command).await,
    }
}

/// Terms given with `--term` replace the configured list for this run.
pub(crate) fn resolve_terms(
    overrides: Vec<String>,
    configured: impl FnOnce() -> anyhow::Result<Vec<SearchTerm>>,
) -> anyhow::Result<Vec<SearchTerm>> {
    if overrides.is_empty() {
        return configured();
    }
    let mut seen = HashSet::new();
    for term in &overrides {
        if term.trim().is_empty() {
            anyhow::bail!("--term must not be blank");
        }
        if !seen.insert(term.as_str()) {
            anyhow::bail!("--term '{term}' given more than once");
        }
    }
    Ok(overrides.into_iter().map(SearchTerm::from).collect())
}

pub(crate) fn load_configured_terms(
    config: &AppConfig,
) -> anyhow::Result<engage_core::TermsFile> {
    Ok(engage_core::load_terms(&config.terms_path)?)
}

pub(crate) fn print_report<T: Serialize>(report: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
