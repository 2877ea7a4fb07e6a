use clap::Subcommand;
use engage_core::AppConfig;
use engage_engine::{search::SEARCH_PAGE_SIZE, SleepRateLimiter, TermSearchEngine};
use engage_linkedin::LinkedinClient;

use crate::{load_configured_terms, print_report, resolve_terms};

/// Sub-commands available under `linkedin`.
#[derive(Debug, Subcommand)]
pub enum LinkedinCommands {
    /// React to posts matching the search terms
    Search {
        /// Search only this term (repeatable); defaults to the terms file
        #[arg(long = "term")]
        terms: Vec<String>,
        /// Posts requested per term
        #[arg(long, default_value_t = SEARCH_PAGE_SIZE)]
        page_size: usize,
    },
}

pub(crate) async fn run(config: &AppConfig, command: LinkedinCommands) -> anyhow::Result<()> {
    let client = LinkedinClient::from_config(config)?;
    let limiter = SleepRateLimiter;

    match command {
        LinkedinCommands::Search { terms, page_size } => {
            let terms = resolve_terms(terms, || Ok(load_configured_terms(config)?.linkedin))?;
            let report = TermSearchEngine::new(&client, &limiter)
                .with_page_size(page_size)
                .run(&terms)
                .await?;
            print_report(&report)
        }
    }
}
