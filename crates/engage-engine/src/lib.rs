//! Search-interact-aggregate engine.
//!
//! Drives a [`Platform`] through two kinds of run:
//!
//! - a term search ([`TermSearchEngine`]) that likes posts matching each
//!   configured term and follows their authors at most once per run, and
//! - a follower scan ([`FollowerActivityScanner`]) that likes recent posts
//!   from the actor's followers.
//!
//! Both runs are strictly sequential and paced by an injectable
//! [`RateLimiter`]. Only setup failures abort a run; every later failure is
//! counted in the returned report.

pub mod aggregate;
pub mod decider;
pub mod error;
pub mod followers;
pub mod ledger;
pub mod platform;
pub mod rate_limit;
pub mod search;

use engage_core::{FollowerScanResult, RunResult, SearchTerm};

pub use aggregate::{FollowerScanAggregator, RunAggregator};
pub use decider::{InteractionDecider, InteractionOutcome, PostResult, SkipReason};
pub use error::{EngineError, PlatformError};
pub use followers::FollowerActivityScanner;
pub use ledger::AuthorLedger;
pub use platform::{Pacing, Platform};
pub use rate_limit::{RateLimiter, SleepRateLimiter};
pub use search::TermSearchEngine;

/// Runs a term search over `terms` in order.
///
/// # Errors
///
/// Returns [`EngineError::DuplicateTerm`] if `terms` repeats a term, or
/// [`EngineError::Setup`] if the actor profile cannot be resolved.
pub async fn run_term_search(
    platform: &dyn Platform,
    limiter: &dyn RateLimiter,
    terms: &[SearchTerm],
) -> Result<RunResult, EngineError> {
    TermSearchEngine::new(platform, limiter).run(terms).await
}

/// Likes recent posts from the actor's followers.
///
/// # Errors
///
/// Returns [`EngineError::Setup`] if the actor profile or follower list
/// cannot be fetched.
pub async fn run_follower_scan(
    platform: &dyn Platform,
    limiter: &dyn RateLimiter,
) -> Result<FollowerScanResult, EngineError> {
    FollowerActivityScanner::new(platform, limiter).run().await
}
