//! Pure accumulation of per-item results into run reports.

use engage_core::{
    ActionKind, AuthorInteractionRecord, FollowerInteraction, FollowerScanResult, Post, RunResult,
    SearchTerm,
};

use crate::decider::{InteractionOutcome, PostResult};
use crate::error::PlatformError;

/// Characters of post text kept in a follower interaction log entry.
pub const POST_PREVIEW_CHARS: usize = 50;

/// Accumulates a term-search [`RunResult`].
#[derive(Debug, Default)]
pub struct RunAggregator {
    result: RunResult,
}

impl RunAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `term` in the report before its search is attempted.
    pub fn begin_term(&mut self, term: &SearchTerm) {
        self.result.terms.entry(term);
    }

    /// The search call for a term failed; the term does not count as searched.
    pub fn record_search_failure(&mut self) {
        self.result.total_errors += 1;
    }

    pub fn record_posts_found(&mut self, term: &SearchTerm, count: usize) {
        self.result.terms.entry(term).posts_found = count;
    }

    pub fn record_post(&mut self, term: &SearchTerm, outcome: &PostResult) {
        match outcome {
            Ok(InteractionOutcome::Skipped(_)) => {}
            Ok(InteractionOutcome::Acted {
                author,
                actions,
                failures,
            }) => {
                self.result.total_liked += count_where(actions, |a| a == ActionKind::Liked);
                self.result.total_followed += count_where(actions, ActionKind::is_relationship);
                self.result.total_errors += failures.len();

                let entry = self.result.terms.entry(term);
                entry.interactions_performed += 1;
                entry.authors.push(AuthorInteractionRecord {
                    author: author.clone(),
                    actions: actions.clone(),
                });
            }
            Err(_) => self.result.total_errors += 1,
        }
    }

    /// The term's search succeeded and all of its posts were processed.
    pub fn complete_term(&mut self) {
        self.result.terms_searched += 1;
    }

    #[must_use]
    pub fn snapshot(&self) -> &RunResult {
        &self.result
    }

    #[must_use]
    pub fn finish(self) -> RunResult {
        self.result
    }
}

fn count_where(actions: &[ActionKind], pred: impl Fn(ActionKind) -> bool) -> usize {
    actions.iter().copied().filter(|a| pred(*a)).count()
}

/// Accumulates a [`FollowerScanResult`].
#[derive(Debug, Default)]
pub struct FollowerScanAggregator {
    result: FollowerScanResult,
}

impl FollowerScanAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_follower_checked(&mut self) {
        self.result.followers_checked += 1;
    }

    pub fn record_feed_failure(&mut self) {
        self.result.errors += 1;
    }

    /// A post inside the activity window, whether or not it gets liked.
    pub fn record_recent_post(&mut self) {
        self.result.posts_found += 1;
    }

    pub fn record_like(
        &mut self,
        follower_handle: &str,
        post: &Post,
        outcome: &Result<(), PlatformError>,
    ) {
        match outcome {
            Ok(()) => {
                self.result.posts_liked += 1;
                self.result.interactions.push(FollowerInteraction {
                    author: follower_handle.to_owned(),
                    post_text: preview(&post.text),
                    action: ActionKind::Liked,
                });
            }
            Err(_) => self.result.errors += 1,
        }
    }

    #[must_use]
    pub fn finish(self) -> FollowerScanResult {
        self.result
    }
}

/// First [`POST_PREVIEW_CHARS`] characters of `text` followed by an ellipsis.
#[must_use]
pub fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(POST_PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}
