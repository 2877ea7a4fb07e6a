use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Platform credentials are optional here: each trigger checks for the
/// credentials of the platform it is about to run.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Set-but-blank values count as unset.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("ENGAGE_ENV", "development"))?;
    let bind_addr = parse_addr("ENGAGE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ENGAGE_LOG_LEVEL", "info");
    let terms_path = PathBuf::from(or_default("ENGAGE_TERMS_PATH", "./config/terms.yaml"));

    let request_timeout_secs = parse_u64("ENGAGE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ENGAGE_USER_AGENT", "engage/0.1 (social-outreach)");

    let run_budget_secs = parse_u64("ENGAGE_RUN_BUDGET_SECS", "300")?;
    if run_budget_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ENGAGE_RUN_BUDGET_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let schedule = optional("ENGAGE_SCHEDULE");

    let cron_secret = optional("CRON_SECRET");

    let bluesky_service_url = or_default("BLUESKY_SERVICE_URL", "https://bsky.social");
    let bluesky_username = optional("BLUESKY_USERNAME");
    let bluesky_password = optional("BLUESKY_PASSWORD");

    let linkedin_base_url = or_default("LINKEDIN_BASE_URL", "https://api.linkedin.com/v2");
    let linkedin_access_token = optional("LINKEDIN_ACCESS_TOKEN");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        terms_path,
        request_timeout_secs,
        user_agent,
        run_budget_secs,
        schedule,
        cron_secret,
        bluesky_service_url,
        bluesky_username,
        bluesky_password,
        linkedin_base_url,
        linkedin_access_token,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ENGAGE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
