//! Per-post interaction decisions: like, then maybe follow the author.

use std::fmt;

use engage_core::{ActionKind, AuthorRef, Post};

use crate::error::PlatformError;
use crate::ledger::AuthorLedger;
use crate::platform::Platform;

/// Why a post was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyLiked,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyLiked => write!(f, "already-liked"),
        }
    }
}

/// What happened to a post the like succeeded on, or why it was skipped.
#[derive(Debug)]
pub enum InteractionOutcome {
    Skipped(SkipReason),
    Acted {
        /// The post's author as completed by [`Platform::resolve_author`].
        author: AuthorRef,
        /// Always starts with [`ActionKind::Liked`].
        actions: Vec<ActionKind>,
        /// Author-level failures after the like (relationship lookup or follow).
        failures: Vec<PlatformError>,
    },
}

impl InteractionOutcome {
    #[must_use]
    pub fn actions(&self) -> &[ActionKind] {
        match self {
            InteractionOutcome::Skipped(_) => &[],
            InteractionOutcome::Acted { actions, .. } => actions,
        }
    }
}

/// Result of processing one post. `Err` means the author lookup or the like
/// failed, and nothing was done to the post.
pub type PostResult = Result<InteractionOutcome, PlatformError>;

/// Decides and performs the interactions for each post of one run.
///
/// Owns the run's [`AuthorLedger`], so a decider must not outlive its run.
pub struct InteractionDecider<'a> {
    platform: &'a dyn Platform,
    ledger: AuthorLedger,
}

impl<'a> InteractionDecider<'a> {
    #[must_use]
    pub fn new(platform: &'a dyn Platform) -> Self {
        Self {
            platform,
            ledger: AuthorLedger::new(),
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &AuthorLedger {
        &self.ledger
    }

    /// Likes `post` unless the actor already has, then considers its author
    /// for the platform's relationship action once per run.
    ///
    /// # Errors
    ///
    /// Returns the [`PlatformError`] from the author lookup or the like
    /// call. A failed lookup skips the like. Relationship failures do not
    /// fail the post; they are reported in the outcome's `failures`.
    pub async fn process(&mut self, post: &Post) -> PostResult {
        if post.already_liked_by_actor {
            tracing::debug!(
                author = %post.author.handle,
                post = %post.id,
                "already liked post, skipping"
            );
            return Ok(InteractionOutcome::Skipped(SkipReason::AlreadyLiked));
        }

        let author = match self.platform.resolve_author(&post.author).await {
            Ok(author) => author,
            Err(e) => {
                tracing::warn!(
                    author = %post.author.id,
                    post = %post.id,
                    error = %e,
                    "author lookup failed, skipping post"
                );
                return Err(e);
            }
        };

        if let Err(e) = self.platform.like(&post.id).await {
            tracing::warn!(
                author = %author.handle,
                post = %post.id,
                error = %e,
                "like failed"
            );
            return Err(e);
        }
        tracing::info!(author = %author.handle, "liked post");

        let mut actions = vec![ActionKind::Liked];
        let mut failures = Vec::new();

        if let Some(kind) = self.platform.relationship_action() {
            if !self.ledger.seen(&author.id) {
                self.ledger.mark_seen(author.id.clone());
                match self.establish_relationship(&author).await {
                    Ok(true) => {
                        tracing::info!(
                            author = %author.handle,
                            action = %kind,
                            "established relationship after like"
                        );
                        actions.push(kind);
                    }
                    Ok(false) => {}
                    Err(e) => {
                        tracing::warn!(
                            author = %author.handle,
                            error = %e,
                            "relationship action failed"
                        );
                        failures.push(e);
                    }
                }
            }
        }

        Ok(InteractionOutcome::Acted {
            author,
            actions,
            failures,
        })
    }

    /// Returns `Ok(true)` if a follow was issued, `Ok(false)` if the actor
    /// already follows the author.
    async fn establish_relationship(&self, author: &AuthorRef) -> Result<bool, PlatformError> {
        let relationship = self.platform.get_relationship(&author.id).await?;
        if relationship.following {
            tracing::debug!(author = %author.handle, "already following author");
            return Ok(false);
        }
        self.platform.follow(&author.id).await?;
        Ok(true)
    }
}
