//! HTTP client for the Bluesky XRPC API.
//!
//! Wraps `reqwest` with session management and typed response
//! deserialization. Every non-2xx XRPC response is surfaced as
//! [`BlueskyError::Api`] carrying the lexicon error name.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::BlueskyError;
use crate::types::{
    AuthorFeedResponse, CreateRecordRequest, CreateSessionRequest, FeedViewPost, FollowRecord,
    FollowersResponse, LikeRecord, PostView, ProfileViewBasic, ProfileViewDetailed,
    SearchPostsResponse, SessionResponse, StrongRef, XrpcErrorBody,
};

const LIKE_COLLECTION: &str = "app.bsky.feed.like";
const FOLLOW_COLLECTION: &str = "app.bsky.graph.follow";

#[derive(Debug, Clone)]
struct Session {
    access_jwt: String,
    refresh_jwt: String,
    did: String,
    handle: String,
}

impl From<SessionResponse> for Session {
    fn from(resp: SessionResponse) -> Self {
        Self {
            access_jwt: resp.access_jwt,
            refresh_jwt: resp.refresh_jwt,
            did: resp.did,
            handle: resp.handle,
        }
    }
}

/// Login identifier and app password, kept to re-create the session once
/// the refresh token is no longer accepted.
struct Credentials {
    identifier: String,
    password: String,
}

/// Authenticated client for one Bluesky account.
///
/// Created by [`BlueskyClient::login`]. When the PDS reports `ExpiredToken`
/// the session is refreshed, or re-created from the stored credentials if
/// the refresh is rejected, and the request is resent once.
pub struct BlueskyClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
    session: RwLock<Session>,
}

impl BlueskyClient {
    /// Builds a client from application config and logs in.
    ///
    /// # Errors
    ///
    /// Returns [`BlueskyError::MissingCredentials`] if the username or
    /// password is unset, otherwise see [`BlueskyClient::login`].
    pub async fn from_config(config: &engage_core::AppConfig) -> Result<Self, BlueskyError> {
        let (identifier, password) = config
            .bluesky_credentials()
            .ok_or(BlueskyError::MissingCredentials)?;
        Self::login(
            &config.bluesky_service_url,
            identifier,
            password,
            config.request_timeout_secs,
            &config.user_agent,
        )
        .await
    }

    /// Creates a session on the PDS at `service_url`.
    ///
    /// # Errors
    ///
    /// - [`BlueskyError::InvalidServiceUrl`] if `service_url` does not parse.
    /// - [`BlueskyError::Api`] if the credentials are rejected.
    /// - [`BlueskyError::Http`] on network failure.
    pub async fn login(
        service_url: &str,
        identifier: &str,
        password: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, BlueskyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let base_url = parse_service_url(service_url)?;
        let credentials = Credentials {
            identifier: identifier.to_owned(),
            password: password.to_owned(),
        };
        let session = create_session(&client, &base_url, &credentials).await?;

        Ok(Self {
            client,
            base_url,
            credentials,
            session: RwLock::new(session),
        })
    }

    /// DID of the logged-in account.
    pub async fn did(&self) -> String {
        self.session.read().await.did.clone()
    }

    /// Handle of the logged-in account.
    pub async fn handle(&self) -> String {
        self.session.read().await.handle.clone()
    }

    /// Searches posts matching `query`, newest-relevance first.
    ///
    /// # Errors
    ///
    /// Returns [`BlueskyError`] on network, API, or decoding failure.
    pub async fn search_posts(&self, query: &str, limit: usize) -> Result<Vec<PostView>, BlueskyError> {
        let limit = limit.to_string();
        let resp: SearchPostsResponse = self
            .get(
                "app.bsky.feed.searchPosts",
                &[("q", query), ("limit", &limit)],
            )
            .await?;
        Ok(resp.posts)
    }

    /// Fetches a profile with the viewer's relationship to it.
    ///
    /// # Errors
    ///
    /// Returns [`BlueskyError`] on network, API, or decoding failure.
    pub async fn get_profile(&self, actor: &str) -> Result<ProfileViewDetailed, BlueskyError> {
        self.get("app.bsky.actor.getProfile", &[("actor", actor)])
            .await
    }

    /// Fetches the first page of `actor`'s followers.
    ///
    /// # Errors
    ///
    /// Returns [`BlueskyError`] on network, API, or decoding failure.
    pub async fn get_followers(&self, actor: &str) -> Result<Vec<ProfileViewBasic>, BlueskyError> {
        let resp: FollowersResponse = self
            .get("app.bsky.graph.getFollowers", &[("actor", actor)])
            .await?;
        Ok(resp.followers)
    }

    /// Fetches `actor`'s most recent feed items (posts and reposts).
    ///
    /// # Errors
    ///
    /// Returns [`BlueskyError`] on network, API, or decoding failure.
    pub async fn get_author_feed(
        &self,
        actor: &str,
        limit: usize,
    ) -> Result<Vec<FeedViewPost>, BlueskyError> {
        let limit = limit.to_string();
        let resp: AuthorFeedResponse = self
            .get(
                "app.bsky.feed.getAuthorFeed",
                &[("actor", actor), ("limit", &limit)],
            )
            .await?;
        Ok(resp.feed)
    }

    /// Creates a like record for the post version identified by `uri` and `cid`.
    ///
    /// # Errors
    ///
    /// Returns [`BlueskyError`] on network or API failure.
    pub async fn like(&self, uri: &str, cid: &str) -> Result<(), BlueskyError> {
        let record = LikeRecord {
            record_type: LIKE_COLLECTION,
            subject: StrongRef { uri, cid },
            created_at: now_timestamp(),
        };
        self.create_record(LIKE_COLLECTION, record).await
    }

    /// Creates a follow record for `did`.
    ///
    /// # Errors
    ///
    /// Returns [`BlueskyError`] on network or API failure.
    pub async fn follow(&self, did: &str) -> Result<(), BlueskyError> {
        let record = FollowRecord {
            record_type: FOLLOW_COLLECTION,
            subject: did,
            created_at: now_timestamp(),
        };
        self.create_record(FOLLOW_COLLECTION, record).await
    }

    async fn create_record<R: Serialize>(
        &self,
        collection: &'static str,
        record: R,
    ) -> Result<(), BlueskyError> {
        let repo = self.did().await;
        let nsid = "com.atproto.repo.createRecord";
        let url = xrpc_url(&self.base_url, nsid, &[]);
        let body = CreateRecordRequest {
            repo: &repo,
            collection,
            record,
        };
        self.send_authed(nsid, |client, token| {
            client.post(url.clone()).bearer_auth(token).json(&body)
        })
        .await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        nsid: &str,
        params: &[(&str, &str)],
    ) -> Result<T, BlueskyError> {
        let url = xrpc_url(&self.base_url, nsid, params);
        let body = self
            .send_authed(nsid, |client, token| {
                client.get(url.clone()).bearer_auth(token)
            })
            .await?;
        decode(nsid, &body)
    }

    /// Sends an authenticated request, renewing the session and resending
    /// once if the access token has expired.
    async fn send_authed<F>(&self, nsid: &str, build: F) -> Result<String, BlueskyError>
    where
        F: Fn(&Client, &str) -> RequestBuilder,
    {
        let token = self.session.read().await.access_jwt.clone();
        match send(nsid, build(&self.client, &token)).await {
            Err(e) if e.is_expired_token() => {
                tracing::debug!(nsid, "access token expired, renewing session");
                let token = self.renew_session().await?;
                send(nsid, build(&self.client, &token)).await
            }
            other => other,
        }
    }

    /// Refreshes the session, logging in again if the refresh token is
    /// expired or revoked. Returns the new access token.
    async fn renew_session(&self) -> Result<String, BlueskyError> {
        let mut session = self.session.write().await;
        let renewed = match self.refresh_session(&session.refresh_jwt).await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                tracing::warn!(error = %e, "session refresh rejected, logging in again");
                create_session(&self.client, &self.base_url, &self.credentials).await?
            }
        };
        *session = renewed;
        Ok(session.access_jwt.clone())
    }

    async fn refresh_session(&self, refresh_jwt: &str) -> Result<Session, BlueskyError> {
        let nsid = "com.atproto.server.refreshSession";
        let url = xrpc_url(&self.base_url, nsid, &[]);
        let body = send(nsid, self.client.post(url).bearer_auth(refresh_jwt)).await?;
        let refreshed: SessionResponse = decode(nsid, &body)?;
        Ok(refreshed.into())
    }
}

async fn create_session(
    client: &Client,
    base_url: &Url,
    credentials: &Credentials,
) -> Result<Session, BlueskyError> {
    let nsid = "com.atproto.server.createSession";
    let url = xrpc_url(base_url, nsid, &[]);
    let body = send(
        nsid,
        client.post(url).json(&CreateSessionRequest {
            identifier: &credentials.identifier,
            password: &credentials.password,
        }),
    )
    .await?;
    let session: SessionResponse = decode(nsid, &body)?;
    tracing::info!(handle = %session.handle, did = %session.did, "bluesky session created");
    Ok(session.into())
}

fn parse_service_url(service_url: &str) -> Result<Url, BlueskyError> {
    let normalised = format!("{}/", service_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| BlueskyError::InvalidServiceUrl {
        url: service_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Builds `{base}/xrpc/{nsid}?{params}` with percent-encoded parameters.
fn xrpc_url(base_url: &Url, nsid: &str, params: &[(&str, &str)]) -> Url {
    let mut url = base_url.clone();
    url.set_path(&format!("{}xrpc/{nsid}", base_url.path()));
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    url
}

/// Sends a request and returns the body text of a 2xx response.
async fn send(nsid: &str, request: RequestBuilder) -> Result<String, BlueskyError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let err: XrpcErrorBody = serde_json::from_str(&body).unwrap_or_default();
        return Err(BlueskyError::Api {
            nsid: nsid.to_owned(),
            status: status.as_u16(),
            error: err.error,
            message: err.message.unwrap_or(body),
        });
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(nsid: &str, body: &str) -> Result<T, BlueskyError> {
    serde_json::from_str(body).map_err(|e| BlueskyError::Deserialize {
        context: nsid.to_owned(),
        source: e,
    })
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
