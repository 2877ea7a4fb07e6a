use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ENGAGE_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.terms_path.to_str(), Some("./config/terms.yaml"));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "engage/0.1 (social-outreach)");
    assert_eq!(cfg.run_budget_secs, 300);
    assert!(cfg.schedule.is_none());
    assert!(cfg.cron_secret.is_none());
    assert_eq!(cfg.bluesky_service_url, "https://bsky.social");
    assert!(cfg.bluesky_credentials().is_none());
    assert_eq!(cfg.linkedin_base_url, "https://api.linkedin.com/v2");
    assert!(cfg.linkedin_access_token.is_none());
}

#[test]
fn build_app_config_reads_platform_credentials() {
    let mut map = HashMap::new();
    map.insert("BLUESKY_USERNAME", "bot.bsky.social");
    map.insert("BLUESKY_PASSWORD", "app-password");
    map.insert("LINKEDIN_ACCESS_TOKEN", "li-token");
    map.insert("CRON_SECRET", "s3cret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.bluesky_credentials(),
        Some(("bot.bsky.social", "app-password"))
    );
    assert_eq!(cfg.linkedin_access_token.as_deref(), Some("li-token"));
    assert_eq!(cfg.cron_secret.as_deref(), Some("s3cret"));
}

#[test]
fn build_app_config_requires_both_bluesky_credentials() {
    let mut map = HashMap::new();
    map.insert("BLUESKY_USERNAME", "bot.bsky.social");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.bluesky_credentials().is_none());
}

#[test]
fn build_app_config_treats_blank_secret_as_unset() {
    let mut map = HashMap::new();
    map.insert("CRON_SECRET", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.cron_secret.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("ENGAGE_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ENGAGE_BIND_ADDR"),
        "expected InvalidEnvVar(ENGAGE_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("ENGAGE_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ENGAGE_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ENGAGE_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_run_budget() {
    let mut map = HashMap::new();
    map.insert("ENGAGE_RUN_BUDGET_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ENGAGE_RUN_BUDGET_SECS"),
        "expected InvalidEnvVar(ENGAGE_RUN_BUDGET_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_schedule_override() {
    let mut map = HashMap::new();
    map.insert("ENGAGE_SCHEDULE", "0 0 */4 * * *");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.schedule.as_deref(), Some("0 0 */4 * * *"));
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = HashMap::new();
    map.insert("BLUESKY_PASSWORD", "hunter2");
    map.insert("LINKEDIN_ACCESS_TOKEN", "li-token");
    map.insert("CRON_SECRET", "s3cret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("hunter2"));
    assert!(!debug.contains("li-token"));
    assert!(!debug.contains("s3cret"));
    assert!(debug.contains("[redacted]"));
}
