//! Capability set the engine drives on a social platform.

use std::time::Duration;

use async_trait::async_trait;
use engage_core::{ActionKind, AuthorId, AuthorRef, Post, PostId, Relationship, SearchTerm};

use crate::error::PlatformError;

/// Fixed inter-call delays calibrated to a platform's published quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// After each post the term search touched the network for.
    pub between_posts: Duration,
    /// Between consecutive search terms.
    pub between_terms: Duration,
    /// After each like attempt in the follower scan.
    pub between_likes: Duration,
}

impl Default for Pacing {
    /// Bluesky's budget of 5,000 write points per hour.
    fn default() -> Self {
        Self {
            between_posts: Duration::from_millis(500),
            between_terms: Duration::from_millis(1000),
            between_likes: Duration::from_millis(500),
        }
    }
}

/// An authenticated session on one social platform, acting as the actor.
///
/// Implementations hold their own session state; the engine never logs in.
/// Operations a platform does not offer return
/// [`PlatformError::Unsupported`].
#[async_trait]
pub trait Platform: Send + Sync {
    /// Short platform name used in logs and errors.
    fn name(&self) -> &'static str;

    /// The relationship action taken after liking a new author's post, if any.
    fn relationship_action(&self) -> Option<ActionKind>;

    fn pacing(&self) -> Pacing {
        Pacing::default()
    }

    async fn get_own_profile(&self) -> Result<AuthorRef, PlatformError>;

    async fn search_posts(
        &self,
        term: &SearchTerm,
        limit: usize,
    ) -> Result<Vec<Post>, PlatformError>;

    /// Completes a search hit's author before the post is liked.
    ///
    /// Called once per post that is about to be liked, inside the paced
    /// per-post step. Platforms whose search results already carry display
    /// handles keep the default.
    async fn resolve_author(&self, author: &AuthorRef) -> Result<AuthorRef, PlatformError> {
        Ok(author.clone())
    }

    async fn like(&self, post: &PostId) -> Result<(), PlatformError>;

    async fn get_relationship(&self, author: &AuthorId) -> Result<Relationship, PlatformError>;

    async fn follow(&self, author: &AuthorId) -> Result<(), PlatformError>;

    async fn get_followers(&self, actor: &AuthorId) -> Result<Vec<AuthorRef>, PlatformError>;

    async fn get_recent_posts(
        &self,
        author: &AuthorId,
        limit: usize,
    ) -> Result<Vec<Post>, PlatformError>;
}
