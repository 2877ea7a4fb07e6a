use std::fmt::Display;

use engage_core::SearchTerm;
use thiserror::Error;

/// Failure of a single platform call.
///
/// Client crates convert their transport-specific errors into this type at
/// the [`Platform`](crate::Platform) boundary.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{platform} session unavailable: {reason}")]
    Session {
        platform: &'static str,
        reason: String,
    },

    #[error("{operation} failed: {reason}")]
    Call {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation} is not supported by {platform}")]
    Unsupported {
        platform: &'static str,
        operation: &'static str,
    },
}

impl PlatformError {
    pub fn call(operation: &'static str, reason: impl Display) -> Self {
        Self::Call {
            operation,
            reason: reason.to_string(),
        }
    }
}

/// Hard failure of a whole run.
///
/// Raised only before any term or follower is processed; everything after
/// setup is isolated and counted instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("run setup failed: {0}")]
    Setup(#[source] PlatformError),

    /// Each term keys its own entry in the report, so repeats are rejected.
    #[error("search term '{0}' is listed more than once")]
    DuplicateTerm(SearchTerm),
}
