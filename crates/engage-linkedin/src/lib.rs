//! LinkedIn v2 REST client implementing the engine's `Platform`.
//!
//! LinkedIn only supports reacting to posts here: relationship, follower,
//! and feed operations report [`engage_engine::PlatformError::Unsupported`].

pub mod client;
pub mod error;
pub mod types;

mod platform;

pub use client::LinkedinClient;
pub use error::LinkedinError;
