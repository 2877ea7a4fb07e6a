//! Wire types for the subset of `app.bsky.*` and `com.atproto.*` lexicons we call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    pub access_jwt: String,
    pub refresh_jwt: String,
    pub did: String,
    pub handle: String,
}

/// Body of a non-2xx XRPC response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct XrpcErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewBasic {
    pub did: String,
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileViewerState {
    /// URI of the actor's follow record, present iff the actor follows this profile.
    #[serde(default)]
    pub following: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewDetailed {
    pub did: String,
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub viewer: Option<ProfileViewerState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostViewerState {
    /// URI of the actor's like record, present iff the actor liked this post.
    #[serde(default)]
    pub like: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub uri: String,
    pub cid: String,
    pub author: ProfileViewBasic,
    #[serde(default)]
    pub record: PostRecord,
    pub indexed_at: DateTime<Utc>,
    #[serde(default)]
    pub viewer: Option<PostViewerState>,
}

impl PostView {
    #[must_use]
    pub fn liked_by_viewer(&self) -> bool {
        self.viewer.as_ref().is_some_and(|v| v.like.is_some())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedViewPost {
    pub post: PostView,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchPostsResponse {
    pub posts: Vec<PostView>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FollowersResponse {
    pub followers: Vec<ProfileViewBasic>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthorFeedResponse {
    pub feed: Vec<FeedViewPost>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StrongRef<'a> {
    pub uri: &'a str,
    pub cid: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRecordRequest<'a, R: Serialize> {
    pub repo: &'a str,
    pub collection: &'static str,
    pub record: R,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LikeRecord<'a> {
    #[serde(rename = "$type")]
    pub record_type: &'static str,
    pub subject: StrongRef<'a>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FollowRecord<'a> {
    #[serde(rename = "$type")]
    pub record_type: &'static str,
    pub subject: &'a str,
    pub created_at: String,
}
