use thiserror::Error;

/// Errors returned by the Bluesky XRPC client.
#[derive(Debug, Error)]
pub enum BlueskyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The XRPC endpoint returned a non-2xx status.
    #[error("{nsid} returned {status}: {message}")]
    Api {
        nsid: String,
        status: u16,
        /// XRPC error name, e.g. `ExpiredToken` or `AuthenticationRequired`.
        error: Option<String>,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid service URL '{url}': {reason}")]
    InvalidServiceUrl { url: String, reason: String },

    #[error("Bluesky credentials are not configured (BLUESKY_USERNAME, BLUESKY_PASSWORD)")]
    MissingCredentials,
}

impl BlueskyError {
    pub(crate) fn is_expired_token(&self) -> bool {
        matches!(self, BlueskyError::Api { error: Some(code), .. } if code == "ExpiredToken")
    }
}
