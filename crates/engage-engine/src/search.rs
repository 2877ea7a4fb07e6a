//! Term search: find posts per term and hand each to the decider.

use std::collections::HashSet;

use engage_core::{RunResult, SearchTerm};

use crate::aggregate::RunAggregator;
use crate::decider::{InteractionDecider, InteractionOutcome};
use crate::error::EngineError;
use crate::platform::{Pacing, Platform};
use crate::rate_limit::RateLimiter;

/// Posts requested per term search.
pub const SEARCH_PAGE_SIZE: usize = 10;

/// Iterates search terms in order, interacting with each matching post.
///
/// Terms, and posts within a term, are processed strictly sequentially. A
/// failed search skips its term; a failed post skips only that post.
pub struct TermSearchEngine<'a> {
    platform: &'a dyn Platform,
    limiter: &'a dyn RateLimiter,
    page_size: usize,
}

impl<'a> TermSearchEngine<'a> {
    #[must_use]
    pub fn new(platform: &'a dyn Platform, limiter: &'a dyn RateLimiter) -> Self {
        Self {
            platform,
            limiter,
            page_size: SEARCH_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Runs the search over `terms` with a fresh author ledger.
    ///
    /// # Errors
    ///
    /// - [`EngineError::DuplicateTerm`] if a term appears twice in `terms`.
    /// - [`EngineError::Setup`] if the actor profile cannot be resolved.
    ///
    /// No term is processed in either case.
    pub async fn run(&self, terms: &[SearchTerm]) -> Result<RunResult, EngineError> {
        let mut distinct = HashSet::with_capacity(terms.len());
        if let Some(repeated) = terms.iter().find(|t| !distinct.insert(*t)) {
            return Err(EngineError::DuplicateTerm(repeated.clone()));
        }

        let actor = self
            .platform
            .get_own_profile()
            .await
            .map_err(EngineError::Setup)?;
        tracing::info!(
            platform = self.platform.name(),
            actor = %actor.handle,
            terms = terms.len(),
            "starting term search"
        );

        let pacing = self.platform.pacing();
        let mut decider = InteractionDecider::new(self.platform);
        let mut report = RunAggregator::new();

        for (idx, term) in terms.iter().enumerate() {
            if idx > 0 {
                self.limiter.pause(pacing.between_terms).await;
            }
            self.search_term(term, pacing, &mut decider, &mut report)
                .await;
        }

        let result = report.finish();
        tracing::info!(
            platform = self.platform.name(),
            terms_searched = result.terms_searched,
            liked = result.total_liked,
            followed = result.total_followed,
            errors = result.total_errors,
            unique_authors = decider.ledger().len(),
            "term search complete"
        );
        Ok(result)
    }

    async fn search_term(
        &self,
        term: &SearchTerm,
        pacing: Pacing,
        decider: &mut InteractionDecider<'_>,
        report: &mut RunAggregator,
    ) {
        tracing::info!(term = %term, "searching term");
        report.begin_term(term);

        let posts = match self.platform.search_posts(term, self.page_size).await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!(term = %term, error = %e, "search failed, skipping term");
                report.record_search_failure();
                return;
            }
        };
        report.record_posts_found(term, posts.len());

        for post in &posts {
            let outcome = decider.process(post).await;
            let touched_platform = !matches!(outcome, Ok(InteractionOutcome::Skipped(_)));
            report.record_post(term, &outcome);
            if touched_platform {
                self.limiter.pause(pacing.between_posts).await;
            }
        }

        report.complete_term();

        if let Some(summary) = report.snapshot().term(term.as_str()) {
            tracing::info!(
                term = %term,
                posts_found = summary.posts_found,
                interactions = summary.interactions_performed,
                "term complete"
            );
        }
    }
}
