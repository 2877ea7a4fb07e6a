use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use engage_core::{ActionKind, AuthorId, AuthorRef, Post, PostId, Relationship, SearchTerm};
use engage_engine::{Pacing, Platform, PlatformError};

use crate::client::LinkedinClient;

const PLATFORM: &str = "linkedin";

fn unsupported(operation: &'static str) -> PlatformError {
    PlatformError::Unsupported {
        platform: PLATFORM,
        operation,
    }
}

#[async_trait]
impl Platform for LinkedinClient {
    fn name(&self) -> &'static str {
        PLATFORM
    }

    fn relationship_action(&self) -> Option<ActionKind> {
        None
    }

    /// No follower scan on LinkedIn, so only the search delays apply.
    fn pacing(&self) -> Pacing {
        Pacing {
            between_posts: Duration::from_millis(2000),
            between_terms: Duration::from_millis(5000),
            ..Pacing::default()
        }
    }

    async fn get_own_profile(&self) -> Result<AuthorRef, PlatformError> {
        let me = self
            .me()
            .await
            .map_err(|e| PlatformError::call("/me", e))?;
        Ok(AuthorRef::new(me.urn(), me.display_name()))
    }

    /// Search hits carry only the author URN, which stands in as the handle
    /// until [`Platform::resolve_author`] looks the name up.
    async fn search_posts(
        &self,
        term: &SearchTerm,
        limit: usize,
    ) -> Result<Vec<Post>, PlatformError> {
        let fetched_at = Utc::now();
        let elements = LinkedinClient::search_posts(self, term.as_str(), limit)
            .await
            .map_err(|e| PlatformError::call("/search/posts", e))?;

        Ok(elements
            .into_iter()
            .map(|element| {
                let published_at = element.created_at().unwrap_or(fetched_at);
                Post {
                    id: PostId::new(element.id, None),
                    author: AuthorRef::new(element.author.clone(), element.author),
                    text: element.commentary.unwrap_or_default(),
                    published_at,
                    already_liked_by_actor: false,
                }
            })
            .collect())
    }

    async fn resolve_author(&self, author: &AuthorRef) -> Result<AuthorRef, PlatformError> {
        let person = self
            .person(author.id.as_str())
            .await
            .map_err(|e| PlatformError::call("/people", e))?;
        Ok(AuthorRef::new(author.id.as_str(), person.display_name()))
    }

    async fn like(&self, post: &PostId) -> Result<(), PlatformError> {
        self.react(&post.uri)
            .await
            .map_err(|e| PlatformError::call("/reactions", e))
    }

    async fn get_relationship(&self, _author: &AuthorId) -> Result<Relationship, PlatformError> {
        Err(unsupported("get_relationship"))
    }

    async fn follow(&self, _author: &AuthorId) -> Result<(), PlatformError> {
        Err(unsupported("follow"))
    }

    async fn get_followers(&self, _actor: &AuthorId) -> Result<Vec<AuthorRef>, PlatformError> {
        Err(unsupported("get_followers"))
    }

    async fn get_recent_posts(
        &self,
        _author: &AuthorId,
        _limit: usize,
    ) -> Result<Vec<Post>, PlatformError> {
        Err(unsupported("get_recent_posts"))
    }
}
