//! HTTP client for the LinkedIn v2 REST API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::error::LinkedinError;
use crate::types::{MeResponse, PersonName, ReactionRequest, SearchPost, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://api.linkedin.com/v2";
const RESTLI_VERSION: &str = "2.0.0";

/// Client for the LinkedIn REST API acting as the token's member.
///
/// The member's profile is fetched once and cached; reactions need the
/// member URN as the actor.
pub struct LinkedinClient {
    client: Client,
    access_token: String,
    base_url: Url,
    me: OnceCell<MeResponse>,
}

impl LinkedinClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, LinkedinError> {
        Self::with_base_url(access_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`LinkedinError::InvalidBaseUrl`] if `base_url` does not
    /// parse as a hierarchical URL.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, LinkedinError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| LinkedinError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(LinkedinError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "not a hierarchical URL".to_owned(),
            });
        }

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url: parsed,
            me: OnceCell::new(),
        })
    }

    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::MissingAccessToken`] when no token is
    /// configured, otherwise see [`LinkedinClient::with_base_url`].
    pub fn from_config(config: &engage_core::AppConfig) -> Result<Self, LinkedinError> {
        let token = config
            .linkedin_access_token
            .as_deref()
            .ok_or(LinkedinError::MissingAccessToken)?;
        Self::with_base_url(
            token,
            config.request_timeout_secs,
            &config.user_agent,
            &config.linkedin_base_url,
        )
    }

    /// The token member's profile, fetched on first use.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError`] if `/me` fails; the next call retries.
    pub async fn me(&self) -> Result<&MeResponse, LinkedinError> {
        self.me
            .get_or_try_init(|| async {
                let url = self.endpoint(
                    &["me"],
                    &[("projection", "(id,localizedFirstName,localizedLastName)")],
                );
                let me: MeResponse = self.get_json("/me", url).await?;
                tracing::info!(
                    urn = %me.urn(),
                    name = %me.display_name(),
                    "linkedin member resolved"
                );
                Ok::<_, LinkedinError>(me)
            })
            .await
    }

    /// Searches posts by keyword, first page only.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError`] on network, API, or decoding failure.
    pub async fn search_posts(
        &self,
        keywords: &str,
        count: usize,
    ) -> Result<Vec<SearchPost>, LinkedinError> {
        let count = count.to_string();
        let url = self.endpoint(
            &["search", "posts"],
            &[("keywords", keywords), ("count", &count), ("start", "0")],
        );
        let resp: SearchResponse = self.get_json("/search/posts", url).await?;
        Ok(resp.elements)
    }

    /// Looks up a member's localized name by person URN.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError`] on network, API, or decoding failure.
    pub async fn person(&self, urn: &str) -> Result<PersonName, LinkedinError> {
        let url = self.endpoint(
            &["people", urn],
            &[("projection", "(localizedFirstName,localizedLastName)")],
        );
        self.get_json("/people", url).await
    }

    /// Adds a `LIKE` reaction from the member to `object`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError`] if the member cannot be resolved or the
    /// reaction is rejected.
    pub async fn react(&self, object: &str) -> Result<(), LinkedinError> {
        let actor = self.me().await?.urn();
        let url = self.endpoint(&["reactions"], &[]);
        let body = ReactionRequest {
            actor: &actor,
            object,
            reaction_type: "LIKE",
        };
        send("/reactions", self.authed(self.client.post(url)).json(&body)).await?;
        Ok(())
    }

    /// Builds `{base}/{segments...}?{params}`; segments are percent-encoded.
    fn endpoint(&self, segments: &[&str], params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.access_token)
            .header("X-Restli-Protocol-Version", RESTLI_VERSION)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: Url,
    ) -> Result<T, LinkedinError> {
        let body = send(endpoint, self.authed(self.client.get(url))).await?;
        serde_json::from_str(&body).map_err(|e| LinkedinError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }
}

/// Sends a request and returns the body text of a 2xx response.
async fn send(endpoint: &str, request: RequestBuilder) -> Result<String, LinkedinError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(LinkedinError::Api {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(body)
}
