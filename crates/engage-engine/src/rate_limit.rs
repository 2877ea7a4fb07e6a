//! Pacing between outbound platform calls.
//!
//! The engine calls [`RateLimiter::pause`] at fixed points between calls. No
//! jitter and no adaptive backoff: delays come from the platform's
//! [`Pacing`](crate::Pacing).

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Suspends the caller for at least `delay`.
    async fn pause(&self, delay: Duration);
}

/// Rate limiter backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepRateLimiter;

#[async_trait]
impl RateLimiter for SleepRateLimiter {
    async fn pause(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        tokio::time::sleep(delay).await;
    }
}
