use async_trait::async_trait;
use engage_core::{ActionKind, AuthorId, AuthorRef, Post, PostId, Relationship, SearchTerm};
use engage_engine::{Platform, PlatformError};

use crate::client::BlueskyClient;
use crate::types::{PostView, ProfileViewBasic};

const PLATFORM: &str = "bluesky";

impl From<PostView> for Post {
    fn from(view: PostView) -> Self {
        let already_liked_by_actor = view.liked_by_viewer();
        Post {
            id: PostId::new(view.uri, Some(view.cid)),
            author: view.author.into(),
            text: view.record.text,
            published_at: view.indexed_at,
            already_liked_by_actor,
        }
    }
}

impl From<ProfileViewBasic> for AuthorRef {
    fn from(profile: ProfileViewBasic) -> Self {
        AuthorRef::new(profile.did, profile.handle)
    }
}

#[async_trait]
impl Platform for BlueskyClient {
    fn name(&self) -> &'static str {
        PLATFORM
    }

    fn relationship_action(&self) -> Option<ActionKind> {
        Some(ActionKind::Followed)
    }

    async fn get_own_profile(&self) -> Result<AuthorRef, PlatformError> {
        let did = self.did().await;
        let profile = self
            .get_profile(&did)
            .await
            .map_err(|e| PlatformError::call("app.bsky.actor.getProfile", e))?;
        Ok(AuthorRef::new(profile.did, profile.handle))
    }

    async fn search_posts(
        &self,
        term: &SearchTerm,
        limit: usize,
    ) -> Result<Vec<Post>, PlatformError> {
        let posts = BlueskyClient::search_posts(self, term.as_str(), limit)
            .await
            .map_err(|e| PlatformError::call("app.bsky.feed.searchPosts", e))?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    async fn like(&self, post: &PostId) -> Result<(), PlatformError> {
        let Some(cid) = post.cid.as_deref() else {
            return Err(PlatformError::call(
                "app.bsky.feed.like",
                format!("post {} has no cid", post.uri),
            ));
        };
        BlueskyClient::like(self, &post.uri, cid)
            .await
            .map_err(|e| PlatformError::call("app.bsky.feed.like", e))
    }

    async fn get_relationship(&self, author: &AuthorId) -> Result<Relationship, PlatformError> {
        let profile = self
            .get_profile(author.as_str())
            .await
            .map_err(|e| PlatformError::call("app.bsky.actor.getProfile", e))?;
        let following = profile
            .viewer
            .is_some_and(|viewer| viewer.following.is_some());
        Ok(Relationship { following })
    }

    async fn follow(&self, author: &AuthorId) -> Result<(), PlatformError> {
        BlueskyClient::follow(self, author.as_str())
            .await
            .map_err(|e| PlatformError::call("app.bsky.graph.follow", e))
    }

    async fn get_followers(&self, actor: &AuthorId) -> Result<Vec<AuthorRef>, PlatformError> {
        let followers = BlueskyClient::get_followers(self, actor.as_str())
            .await
            .map_err(|e| PlatformError::call("app.bsky.graph.getFollowers", e))?;
        Ok(followers.into_iter().map(AuthorRef::from).collect())
    }

    async fn get_recent_posts(
        &self,
        author: &AuthorId,
        limit: usize,
    ) -> Result<Vec<Post>, PlatformError> {
        let feed = self
            .get_author_feed(author.as_str(), limit)
            .await
            .map_err(|e| PlatformError::call("app.bsky.feed.getAuthorFeed", e))?;
        Ok(feed.into_iter().map(|item| Post::from(item.post)).collect())
    }
}
