use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub terms_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Wall-clock budget for one triggered run.
    pub run_budget_secs: u64,
    /// Cron expression for periodic runs; `None` disables the scheduler.
    pub schedule: Option<String>,
    pub cron_secret: Option<String>,
    pub bluesky_service_url: String,
    pub bluesky_username: Option<String>,
    pub bluesky_password: Option<String>,
    pub linkedin_base_url: String,
    pub linkedin_access_token: Option<String>,
}

impl AppConfig {
    /// Bluesky identifier and password, when both are configured.
    #[must_use]
    pub fn bluesky_credentials(&self) -> Option<(&str, &str)> {
        match (&self.bluesky_username, &self.bluesky_password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("terms_path", &self.terms_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("run_budget_secs", &self.run_budget_secs)
            .field("schedule", &self.schedule)
            .field(
                "cron_secret",
                &self.cron_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("bluesky_service_url", &self.bluesky_service_url)
            .field("bluesky_username", &self.bluesky_username)
            .field(
                "bluesky_password",
                &self.bluesky_password.as_ref().map(|_| "[redacted]"),
            )
            .field("linkedin_base_url", &self.linkedin_base_url)
            .field(
                "linkedin_access_token",
                &self.linkedin_access_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
