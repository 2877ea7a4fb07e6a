//! Shared domain types and configuration for the engage workspace.

pub mod app_config;
pub mod config;
pub mod terms;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use terms::{load_terms, TermsFile};
pub use types::{
    ActionKind, AuthorId, AuthorInteractionRecord, AuthorRef, FollowerInteraction,
    FollowerScanResult, Post, PostId, Relationship, RunResult, SearchTerm, TermResult,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read terms file {path}: {source}")]
    TermsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse terms file: {0}")]
    TermsFileParse(#[from] serde_yaml::Error),

    #[error("terms validation failed: {0}")]
    Validation(String),
}
