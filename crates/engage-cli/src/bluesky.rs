use clap::Subcommand;
use engage_bluesky::BlueskyClient;
use engage_core::AppConfig;
use engage_engine::{run_follower_scan, search::SEARCH_PAGE_SIZE, SleepRateLimiter, TermSearchEngine};

use crate::{load_configured_terms, print_report, resolve_terms};

/// Sub-commands available under `bluesky`.
#[derive(Debug, Subcommand)]
pub enum BlueskyCommands {
    /// Like posts matching the search terms and follow their authors
    Search {
        /// Search only this term (repeatable); defaults to the terms file
        #[arg(long = "term")]
        terms: Vec<String>,
        /// Posts requested per term
        #[arg(long, default_value_t = SEARCH_PAGE_SIZE)]
        page_size: usize,
    },
    /// Like followers' posts from the last four hours
    Followers,
}

pub(crate) async fn run(config: &AppConfig, command: BlueskyCommands) -> anyhow::Result<()> {
    let client = BlueskyClient::from_config(config).await?;
    let limiter = SleepRateLimiter;

    match command {
        BlueskyCommands::Search { terms, page_size } => {
            let terms = resolve_terms(terms, || Ok(load_configured_terms(config)?.bluesky))?;
            let report = TermSearchEngine::new(&client, &limiter)
                .with_page_size(page_size)
                .run(&terms)
                .await?;
            print_report(&report)
        }
        BlueskyCommands::Followers => {
            let report = run_follower_scan(&client, &limiter).await?;
            print_report(&report)
        }
    }
}
