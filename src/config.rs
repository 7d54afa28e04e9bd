//! Configuration management for the API client

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.uptimerobot.com/v2";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Account or monitor-specific API key
    pub api_key: String,

    /// Base URL; operation names are appended as path segments
    pub api_url: String,

    /// HTTP timeout for API requests
    pub http_timeout: Duration,

    /// Reject unregistered enumeration names before sending create/update requests
    pub strict_validation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            strict_validation: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(api_key) = env::var("UPTIMEROBOT_API_KEY") {
            config.api_key = api_key;
        }

        if let Ok(api_url) = env::var("UPTIMEROBOT_API_URL") {
            config.api_url = api_url;
        }

        if let Ok(timeout) = env::var("HTTP_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.http_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(strict) = env::var("UPTIMEROBOT_STRICT_VALIDATION") {
            config.strict_validation = strict.to_lowercase() == "true";
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("api_key cannot be empty".to_string());
        }

        if self.api_url.is_empty() {
            return Err("api_url cannot be empty".to_string());
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(format!("api_url must be an http(s) URL: {}", self.api_url));
        }

        if self.http_timeout.is_zero() {
            return Err("http_timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            api_key: "u123-abc".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert!(!config.strict_validation);
    }

    #[test]
    fn test_validate() {
        assert!(valid().validate().is_ok());
        assert!(Config::default().validate().is_err());

        let config = Config {
            api_url: "ftp://example.com".to_string(),
            ..valid()
        };
        assert!(config.validate().is_err());

        let config = Config {
            http_timeout: Duration::ZERO,
            ..valid()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            "http_timeout must be greater than 0"
        );
    }
}
