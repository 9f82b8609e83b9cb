//! Client configuration from environment variables
//!
//! | Variable                  | Default                       |
//! |---------------------------|-------------------------------|
//! | `MONEYREPO_API_URL`       | `http://127.0.0.1:8000/api`   |
//! | `MONEYREPO_TIMEOUT_SECS`  | `10`                          |
//! | `MONEYREPO_TOKEN_FILE`    | `.moneyrepo/jwt_token`        |
//! | `MONEYREPO_LOG_DIR`       | `logs`                        |
//! | `RUST_LOG`                | `moneyrepo_client=info,warn`  |
//!
//! Call `dotenvy::dotenv()` first to pick up a `.env` file.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{AppError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_LEVEL: &str = "moneyrepo_client=info,warn";

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub api_base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Where the bearer token is persisted
    pub token_file: PathBuf,
    /// Directory for the rolling log files
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "moneyrepo_client=debug,info")
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_file: PathBuf::from(".moneyrepo/jwt_token"),
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let api_base_url = match var("MONEYREPO_API_URL") {
            Some(url) => validate_base_url(&url)?,
            None => defaults.api_base_url,
        };

        let request_timeout = match var("MONEYREPO_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::Config(format!(
                        "MONEYREPO_TIMEOUT_SECS must be a positive number of seconds, got {:?}",
                        raw
                    )))
                }
            },
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_base_url,
            request_timeout,
            token_file: var("MONEYREPO_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_file),
            log_dir: var("MONEYREPO_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: var("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug")
    }
}

fn validate_base_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::Config(format!(
            "MONEYREPO_API_URL must start with http:// or https://, got {:?}",
            url
        )));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("MONEYREPO_API_URL", "https://money.example.com/api/"),
            ("MONEYREPO_TIMEOUT_SECS", "3"),
            ("MONEYREPO_TOKEN_FILE", "/tmp/token"),
            ("MONEYREPO_LOG_DIR", "/tmp/logs"),
            ("RUST_LOG", "moneyrepo_client=debug"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://money.example.com/api");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.token_file, PathBuf::from("/tmp/token"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert!(config.is_debug_enabled());
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[("MONEYREPO_API_URL", "  ")])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let bad_timeout = ClientConfig::from_lookup(lookup(&[("MONEYREPO_TIMEOUT_SECS", "0")]));
        assert!(matches!(bad_timeout, Err(AppError::Config(_))));

        let bad_url = ClientConfig::from_lookup(lookup(&[("MONEYREPO_API_URL", "localhost:8000")]));
        assert!(matches!(bad_url, Err(AppError::Config(_))));
    }
}
