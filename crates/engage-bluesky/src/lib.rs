//! Bluesky (AT Protocol) client implementing the engine's `Platform`.

pub mod client;
pub mod error;
pub mod types;

mod platform;

pub use client::BlueskyClient;
pub use error::BlueskyError;
