//! In-memory platform and rate limiter doubles for engine tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use engage_core::{ActionKind, AuthorId, AuthorRef, Post, PostId, Relationship, SearchTerm};
use engage_engine::{Pacing, Platform, PlatformError, RateLimiter};

/// Every call the stub received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OwnProfile,
    Search(String, usize),
    ResolveAuthor(String),
    Like(String),
    Relationship(String),
    Follow(String),
    Followers(String),
    RecentPosts(String, usize),
}

pub struct StubPlatform {
    profile_fails: bool,
    relationship_action: Option<ActionKind>,
    pacing: Pacing,
    search: HashMap<String, Vec<Post>>,
    failing_searches: HashSet<String>,
    failing_authors: HashSet<String>,
    failing_likes: HashSet<String>,
    following: HashSet<String>,
    failing_relationships: HashSet<String>,
    failing_follows: HashSet<String>,
    followers: Vec<AuthorRef>,
    followers_fail: bool,
    feeds: HashMap<String, Vec<Post>>,
    failing_feeds: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl Default for StubPlatform {
    fn default() -> Self {
        Self {
            profile_fails: false,
            relationship_action: Some(ActionKind::Followed),
            pacing: Pacing::default(),
            search: HashMap::new(),
            failing_searches: HashSet::new(),
            failing_authors: HashSet::new(),
            failing_likes: HashSet::new(),
            following: HashSet::new(),
            failing_relationships: HashSet::new(),
            failing_follows: HashSet::new(),
            followers: Vec::new(),
            followers_fail: false,
            feeds: HashMap::new(),
            failing_feeds: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, term: &str, posts: Vec<Post>) -> Self {
        self.search.insert(term.to_owned(), posts);
        self
    }

    pub fn with_failing_search(mut self, term: &str) -> Self {
        self.failing_searches.insert(term.to_owned());
        self
    }

    pub fn with_failing_author_lookup(mut self, author: &str) -> Self {
        self.failing_authors.insert(author.to_owned());
        self
    }

    pub fn with_failing_like(mut self, post_uri: &str) -> Self {
        self.failing_likes.insert(post_uri.to_owned());
        self
    }

    pub fn already_following(mut self, author: &str) -> Self {
        self.following.insert(author.to_owned());
        self
    }

    pub fn with_failing_relationship(mut self, author: &str) -> Self {
        self.failing_relationships.insert(author.to_owned());
        self
    }

    pub fn with_failing_follow(mut self, author: &str) -> Self {
        self.failing_follows.insert(author.to_owned());
        self
    }

    pub fn with_failing_profile(mut self) -> Self {
        self.profile_fails = true;
        self
    }

    pub fn without_relationship_action(mut self) -> Self {
        self.relationship_action = None;
        self
    }

    pub fn with_follower(mut self, follower: AuthorRef, feed: Vec<Post>) -> Self {
        self.feeds.insert(follower.id.as_str().to_owned(), feed);
        self.followers.push(follower);
        self
    }

    pub fn with_failing_feed(mut self, follower: AuthorRef) -> Self {
        self.failing_feeds.insert(follower.id.as_str().to_owned());
        self.followers.push(follower);
        self
    }

    pub fn with_failing_followers(mut self) -> Self {
        self.followers_fail = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn like_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Like(_)))
    }

    pub fn follow_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Follow(_)))
    }

    pub fn relationship_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Relationship(_)))
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Platform for StubPlatform {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn relationship_action(&self) -> Option<ActionKind> {
        self.relationship_action
    }

    fn pacing(&self) -> Pacing {
        self.pacing
    }

    async fn get_own_profile(&self) -> Result<AuthorRef, PlatformError> {
        self.record(Call::OwnProfile);
        if self.profile_fails {
            return Err(PlatformError::Session {
                platform: "stub",
                reason: "login rejected".to_owned(),
            });
        }
        Ok(AuthorRef::new("did:plc:actor", "actor.test"))
    }

    async fn search_posts(
        &self,
        term: &SearchTerm,
        limit: usize,
    ) -> Result<Vec<Post>, PlatformError> {
        self.record(Call::Search(term.as_str().to_owned(), limit));
        if self.failing_searches.contains(term.as_str()) {
            return Err(PlatformError::call("searchPosts", "503 Service Unavailable"));
        }
        Ok(self.search.get(term.as_str()).cloned().unwrap_or_default())
    }

    async fn resolve_author(&self, author: &AuthorRef) -> Result<AuthorRef, PlatformError> {
        self.record(Call::ResolveAuthor(author.id.as_str().to_owned()));
        if self.failing_authors.contains(author.id.as_str()) {
            return Err(PlatformError::call("people", "404 Not Found"));
        }
        Ok(author.clone())
    }

    async fn like(&self, post: &PostId) -> Result<(), PlatformError> {
        self.record(Call::Like(post.uri.clone()));
        if self.failing_likes.contains(&post.uri) {
            return Err(PlatformError::call("like", "400 Bad Request"));
        }
        Ok(())
    }

    async fn get_relationship(&self, author: &AuthorId) -> Result<Relationship, PlatformError> {
        self.record(Call::Relationship(author.as_str().to_owned()));
        if self.failing_relationships.contains(author.as_str()) {
            return Err(PlatformError::call("getProfile", "timeout"));
        }
        Ok(Relationship {
            following: self.following.contains(author.as_str()),
        })
    }

    async fn follow(&self, author: &AuthorId) -> Result<(), PlatformError> {
        self.record(Call::Follow(author.as_str().to_owned()));
        if self.failing_follows.contains(author.as_str()) {
            return Err(PlatformError::call("follow", "blocked"));
        }
        Ok(())
    }

    async fn get_followers(&self, actor: &AuthorId) -> Result<Vec<AuthorRef>, PlatformError> {
        self.record(Call::Followers(actor.as_str().to_owned()));
        if self.followers_fail {
            return Err(PlatformError::call("getFollowers", "500"));
        }
        Ok(self.followers.clone())
    }

    async fn get_recent_posts(
        &self,
        author: &AuthorId,
        limit: usize,
    ) -> Result<Vec<Post>, PlatformError> {
        self.record(Call::RecentPosts(author.as_str().to_owned(), limit));
        if self.failing_feeds.contains(author.as_str()) {
            return Err(PlatformError::call("getAuthorFeed", "500"));
        }
        Ok(self.feeds.get(author.as_str()).cloned().unwrap_or_default())
    }
}

/// Records requested pauses instead of sleeping.
#[derive(Default)]
pub struct RecordingRateLimiter {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingRateLimiter {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl RateLimiter for RecordingRateLimiter {
    async fn pause(&self, delay: Duration) {
        self.pauses.lock().unwrap().push(delay);
    }
}

pub fn author(id: &str) -> AuthorRef {
    AuthorRef::new(id, format!("{}.test", id.trim_start_matches("did:plc:")))
}

pub fn post(uri: &str, author_id: &str) -> Post {
    post_at(uri, author_id, Utc::now())
}

pub fn post_at(uri: &str, author_id: &str, published_at: DateTime<Utc>) -> Post {
    Post {
        id: PostId::new(uri, Some(format!("cid-{uri}"))),
        author: author(author_id),
        text: format!("post {uri}"),
        published_at,
        already_liked_by_actor: false,
    }
}

pub fn liked(mut post: Post) -> Post {
    post.already_liked_by_actor = true;
    post
}
