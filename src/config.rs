//! Centralized configuration management for agridesk

use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://dev-api.farmeasytechnologies.com/api";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the platform API
    pub api_base_url: String,
    /// Bearer token for farmer-detail endpoints (optional)
    pub api_token: Option<String>,
    /// Default number of records fetched per page (`limit` query parameter)
    pub page_limit: usize,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "agridesk/0.1.0".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("AGRIDESK_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let api_token = std::env::var("AGRIDESK_API_TOKEN").ok();

        let page_limit = parse_env_var("AGRIDESK_PAGE_LIMIT")?.unwrap_or(10);

        let http = HttpConfig {
            timeout_seconds: parse_env_var("AGRIDESK_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("AGRIDESK_USER_AGENT")
                .unwrap_or_else(|_| "agridesk/0.1.0".to_string()),
        };

        Ok(Config {
            api_base_url,
            api_token,
            page_limit,
            http,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(anyhow::anyhow!("API base URL must not be empty"));
        }
        if self.api_base_url.ends_with('/') {
            return Err(anyhow::anyhow!(
                "API base URL must not end with '/': {}",
                self.api_base_url
            ));
        }
        if self.page_limit == 0 {
            return Err(anyhow::anyhow!("Page limit must be at least 1"));
        }
        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            page_limit: 10,
            http: HttpConfig::default(),
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = base_config();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.page_limit, 10);
        assert_eq!(config.http.timeout_seconds, 30);
        config.validate().unwrap();
    }

    #[test]
    fn test_config_rejects_trailing_slash() {
        let mut config = base_config();
        config.api_base_url = "https://example.com/api/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_zero_page_limit() {
        let mut config = base_config();
        config.page_limit = 0;
        assert!(config.validate().is_err());
    }
}
