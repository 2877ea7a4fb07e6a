use std::fmt;

use chrono::{DateTime, Utc};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

/// A topic keyword monitored for new matching posts.
///
/// No internal structure; two terms are equal iff their strings match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self(term.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SearchTerm {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for SearchTerm {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Stable platform identifier of an account (a Bluesky DID, a LinkedIn URN).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(String);

impl AuthorId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A platform account: the author of a post, a follower, or the actor itself.
///
/// Two `AuthorRef`s denote the same author iff their `id`s match; the handle
/// is display-only and may change between fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: AuthorId,
    pub handle: String,
}

impl AuthorRef {
    #[must_use]
    pub fn new(id: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id: AuthorId::new(id),
            handle: handle.into(),
        }
    }
}

impl PartialEq for AuthorRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AuthorRef {}

/// Platform content identifier.
///
/// Bluesky addresses a post by its AT URI plus the content hash (`cid`) of the
/// record version; LinkedIn uses the activity URN alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId {
    pub uri: String,
    pub cid: Option<String>,
}

impl PostId {
    #[must_use]
    pub fn new(uri: impl Into<String>, cid: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            cid,
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Immutable snapshot of a post as observed at fetch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub author: AuthorRef,
    pub text: String,
    pub published_at: DateTime<Utc>,
    /// Whether the actor had already liked this post when it was fetched.
    pub already_liked_by_actor: bool,
}

/// The actor's current relationship to another account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub following: bool,
}

/// An interaction effect performed on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Liked,
    Followed,
    Connected,
    Commented,
}

impl ActionKind {
    /// Returns `true` for actions that establish a relationship with the author.
    #[must_use]
    pub fn is_relationship(self) -> bool {
        matches!(self, ActionKind::Followed | ActionKind::Connected)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Liked => write!(f, "liked"),
            ActionKind::Followed => write!(f, "followed"),
            ActionKind::Connected => write!(f, "connected"),
            ActionKind::Commented => write!(f, "commented"),
        }
    }
}

/// Actions performed on one author for one processed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorInteractionRecord {
    #[serde(flatten)]
    pub author: AuthorRef,
    pub actions: Vec<ActionKind>,
}

/// Per-term counters and the authors interacted with for that term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermResult {
    pub posts_found: usize,
    pub interactions_performed: usize,
    pub authors: Vec<AuthorInteractionRecord>,
}

/// Term results keyed by term, in the order terms were processed.
///
/// Serializes as a JSON object whose keys keep processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermResults(Vec<(SearchTerm, TermResult)>);

impl TermResults {
    #[must_use]
    pub fn get(&self, term: &str) -> Option<&TermResult> {
        self.0
            .iter()
            .find(|(t, _)| t.as_str() == term)
            .map(|(_, r)| r)
    }

    /// Returns the result for `term`, inserting an empty one at the end if absent.
    pub fn entry(&mut self, term: &SearchTerm) -> &mut TermResult {
        let idx = match self.0.iter().position(|(t, _)| t == term) {
            Some(idx) => idx,
            None => {
                self.0.push((term.clone(), TermResult::default()));
                self.0.len() - 1
            }
        };
        &mut self.0[idx].1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SearchTerm, &TermResult)> {
        self.0.iter().map(|(t, r)| (t, r))
    }
}

impl Serialize for TermResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (term, result) in &self.0 {
            map.serialize_entry(term.as_str(), result)?;
        }
        map.end()
    }
}

/// Report of one term-search run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub terms_searched: usize,
    pub total_liked: usize,
    pub total_followed: usize,
    pub total_errors: usize,
    pub terms: TermResults,
}

impl RunResult {
    #[must_use]
    pub fn term(&self, term: &str) -> Option<&TermResult> {
        self.terms.get(term)
    }
}

/// One like performed on a follower's recent post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerInteraction {
    /// Handle of the follower whose feed the post came from.
    pub author: String,
    /// Post text truncated for display.
    pub post_text: String,
    pub action: ActionKind,
}

/// Report of one follower-activity scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerScanResult {
    pub followers_checked: usize,
    pub posts_found: usize,
    pub posts_liked: usize,
    pub errors: usize,
    pub interactions: Vec<FollowerInteraction>,
}
