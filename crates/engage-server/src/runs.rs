//! Whole-platform runs shared by the HTTP triggers and the scheduler.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use engage_core::{FollowerScanResult, RunResult};
use engage_engine::{run_follower_scan, run_term_search, EngineError};
use serde::Serialize;
use thiserror::Error;

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("platform session unavailable: {0:#}")]
    Session(anyhow::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("run exceeded its budget of {0:?}")]
    BudgetExceeded(Duration),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueskyReport {
    pub success: bool,
    pub timestamp: String,
    pub search_results: RunResult,
    pub follower_results: FollowerScanResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinReport {
    pub success: bool,
    pub timestamp: String,
    pub results: RunResult,
}

/// Term search then follower scan on Bluesky, within the run budget.
pub async fn run_bluesky(state: &AppState) -> Result<BlueskyReport, RunError> {
    let session = state.bluesky();
    let _guard = session.lock_run().await;
    let platform = session.get().await.map_err(RunError::Session)?;
    let terms = &state.terms().bluesky;

    tracing::info!(terms = terms.len(), "bluesky run started");
    let run = async {
        let search_results = run_term_search(platform.as_ref(), state.limiter(), terms).await?;
        let follower_results = run_follower_scan(platform.as_ref(), state.limiter()).await?;
        Ok::<_, EngineError>((search_results, follower_results))
    };
    let (search_results, follower_results) = tokio::time::timeout(state.run_budget(), run)
        .await
        .map_err(|_| RunError::BudgetExceeded(state.run_budget()))??;

    tracing::info!(
        terms_searched = search_results.terms_searched,
        liked = search_results.total_liked + follower_results.posts_liked,
        followed = search_results.total_followed,
        errors = search_results.total_errors + follower_results.errors,
        "bluesky run complete"
    );
    Ok(BlueskyReport {
        success: true,
        timestamp: now_timestamp(),
        search_results,
        follower_results,
    })
}

/// Term search on LinkedIn, within the run budget.
pub async fn run_linkedin(state: &AppState) -> Result<LinkedinReport, RunError> {
    let session = state.linkedin();
    let _guard = session.lock_run().await;
    let platform = session.get().await.map_err(RunError::Session)?;
    let terms = &state.terms().linkedin;

    tracing::info!(terms = terms.len(), "linkedin run started");
    let results = tokio::time::timeout(
        state.run_budget(),
        run_term_search(platform.as_ref(), state.limiter(), terms),
    )
    .await
    .map_err(|_| RunError::BudgetExceeded(state.run_budget()))??;

    tracing::info!(
        terms_searched = results.terms_searched,
        liked = results.total_liked,
        errors = results.total_errors,
        "linkedin run complete"
    );
    Ok(LinkedinReport {
        success: true,
        timestamp: now_timestamp(),
        results,
    })
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
