//! Shared router state: configuration, search terms, and lazily established
//! platform sessions.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use engage_bluesky::BlueskyClient;
use engage_core::{AppConfig, TermsFile};
use engage_engine::{Platform, RateLimiter, SleepRateLimiter};
use engage_linkedin::LinkedinClient;
use tokio::sync::{Mutex, OnceCell};

/// Opens an authenticated session on one platform.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> anyhow::Result<Arc<dyn Platform>>;
}

pub struct BlueskyConnector(pub Arc<AppConfig>);

#[async_trait]
impl Connector for BlueskyConnector {
    async fn connect(&self) -> anyhow::Result<Arc<dyn Platform>> {
        let client = BlueskyClient::from_config(&self.0)
            .await
            .context("bluesky login failed")?;
        Ok(Arc::new(client))
    }
}

pub struct LinkedinConnector(pub Arc<AppConfig>);

#[async_trait]
impl Connector for LinkedinConnector {
    async fn connect(&self) -> anyhow::Result<Arc<dyn Platform>> {
        let client =
            LinkedinClient::from_config(&self.0).context("linkedin client setup failed")?;
        Ok(Arc::new(client))
    }
}

/// A platform session established on first use and reused for the life of
/// the process.
///
/// A failed connection leaves the cell empty, so the next run retries. The
/// run lock keeps two runs (an HTTP trigger and a scheduled tick, say) from
/// driving the same account at once.
pub struct LazySession {
    connector: Box<dyn Connector>,
    cell: OnceCell<Arc<dyn Platform>>,
    run_lock: Mutex<()>,
}

impl LazySession {
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self {
            connector: Box::new(connector),
            cell: OnceCell::new(),
            run_lock: Mutex::new(()),
        }
    }

    pub async fn get(&self) -> anyhow::Result<Arc<dyn Platform>> {
        let platform = self
            .cell
            .get_or_try_init(|| self.connector.connect())
            .await?;
        Ok(Arc::clone(platform))
    }

    pub async fn lock_run(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.run_lock.lock().await
    }
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    terms: TermsFile,
    run_budget: Duration,
    limiter: Arc<dyn RateLimiter>,
    bluesky: LazySession,
    linkedin: LazySession,
}

impl AppState {
    pub fn from_config(config: Arc<AppConfig>, terms: TermsFile) -> Self {
        Self::new(
            terms,
            Duration::from_secs(config.run_budget_secs),
            Arc::new(SleepRateLimiter),
            LazySession::new(BlueskyConnector(Arc::clone(&config))),
            LazySession::new(LinkedinConnector(config)),
        )
    }

    pub fn new(
        terms: TermsFile,
        run_budget: Duration,
        limiter: Arc<dyn RateLimiter>,
        bluesky: LazySession,
        linkedin: LazySession,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                terms,
                run_budget,
                limiter,
                bluesky,
                linkedin,
            }),
        }
    }

    pub fn terms(&self) -> &TermsFile {
        &self.inner.terms
    }

    pub fn run_budget(&self) -> Duration {
        self.inner.run_budget
    }

    pub fn limiter(&self) -> &dyn RateLimiter {
        self.inner.limiter.as_ref()
    }

    pub fn bluesky(&self) -> &LazySession {
        &self.inner.bluesky
    }

    pub fn linkedin(&self) -> &LazySession {
        &self.inner.linkedin
    }
}
