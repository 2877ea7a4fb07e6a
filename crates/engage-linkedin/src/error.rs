use thiserror::Error;

/// Errors returned by the LinkedIn REST client.
#[derive(Debug, Error)]
pub enum LinkedinError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the body text.
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("LinkedIn access token is not configured (LINKEDIN_ACCESS_TOKEN)")]
    MissingAccessToken,
}
