//! Follower activity scan: like followers' posts from the trailing window.

use chrono::{DateTime, Duration, Utc};
use engage_core::FollowerScanResult;

use crate::aggregate::FollowerScanAggregator;
use crate::error::EngineError;
use crate::platform::Platform;
use crate::rate_limit::RateLimiter;

/// Recent posts fetched per follower.
pub const RECENT_POSTS_LIMIT: usize = 20;

/// Age limit, in hours, for a follower post to be liked.
pub const ACTIVITY_WINDOW_HOURS: i64 = 4;

pub struct FollowerActivityScanner<'a> {
    platform: &'a dyn Platform,
    limiter: &'a dyn RateLimiter,
    feed_limit: usize,
    window: Duration,
}

impl<'a> FollowerActivityScanner<'a> {
    #[must_use]
    pub fn new(platform: &'a dyn Platform, limiter: &'a dyn RateLimiter) -> Self {
        Self {
            platform,
            limiter,
            feed_limit: RECENT_POSTS_LIMIT,
            window: Duration::hours(ACTIVITY_WINDOW_HOURS),
        }
    }

    /// Scans relative to the current time.
    ///
    /// # Errors
    ///
    /// See [`FollowerActivityScanner::run_at`].
    pub async fn run(&self) -> Result<FollowerScanResult, EngineError> {
        self.run_at(Utc::now()).await
    }

    /// Scans every follower's recent posts, liking those published at or
    /// after `now - window` that the actor has not liked yet.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Setup`] if the actor profile or the follower
    /// list cannot be fetched. Per-follower and per-post failures are
    /// counted in the result instead.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<FollowerScanResult, EngineError> {
        let actor = self
            .platform
            .get_own_profile()
            .await
            .map_err(EngineError::Setup)?;
        let followers = self
            .platform
            .get_followers(&actor.id)
            .await
            .map_err(EngineError::Setup)?;
        tracing::info!(
            platform = self.platform.name(),
            actor = %actor.handle,
            followers = followers.len(),
            "starting follower scan"
        );

        let pacing = self.platform.pacing();
        let cutoff = now - self.window;
        let mut report = FollowerScanAggregator::new();

        for follower in &followers {
            report.record_follower_checked();

            let posts = match self
                .platform
                .get_recent_posts(&follower.id, self.feed_limit)
                .await
            {
                Ok(posts) => posts,
                Err(e) => {
                    tracing::warn!(
                        follower = %follower.handle,
                        error = %e,
                        "failed to fetch follower feed"
                    );
                    report.record_feed_failure();
                    continue;
                }
            };

            for post in posts.iter().filter(|p| p.published_at >= cutoff) {
                report.record_recent_post();
                if post.already_liked_by_actor {
                    continue;
                }

                let outcome = self.platform.like(&post.id).await;
                match &outcome {
                    Ok(()) => tracing::info!(
                        follower = %follower.handle,
                        post = %post.id,
                        "liked follower post"
                    ),
                    Err(e) => tracing::warn!(
                        follower = %follower.handle,
                        post = %post.id,
                        error = %e,
                        "like failed"
                    ),
                }
                report.record_like(&follower.handle, post, &outcome);
                self.limiter.pause(pacing.between_likes).await;
            }
        }

        let result = report.finish();
        tracing::info!(
            platform = self.platform.name(),
            followers_checked = result.followers_checked,
            posts_found = result.posts_found,
            posts_liked = result.posts_liked,
            errors = result.errors,
            "follower scan complete"
        );
        Ok(result)
    }
}
