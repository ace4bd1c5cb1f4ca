//! Centralized configuration management for tenant-console

use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::table::PageSize;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the administration API
    pub api_url: String,
    /// Bearer token for the API (optional)
    pub api_token: Option<String>,
    /// Rows per page when a list is opened
    pub page_size: PageSize,
    /// Log file written by every command
    pub log_file: PathBuf,
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
            user_agent: concat!("tenant-console/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            api_token: None,
            page_size: PageSize::default(),
            log_file: PathBuf::from("tenant-console.log"),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let http = HttpConfig {
            timeout_seconds: parse_var(&lookup, "CONSOLE_HTTP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.http.timeout_seconds),
            user_agent: lookup("CONSOLE_USER_AGENT").unwrap_or(defaults.http.user_agent),
        };

        Ok(Config {
            api_url: lookup("CONSOLE_API_URL").unwrap_or(defaults.api_url),
            api_token: lookup("CONSOLE_API_TOKEN"),
            page_size: parse_var(&lookup, "CONSOLE_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            log_file: lookup("CONSOLE_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            http,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        Ok(())
    }
}

/// Helper function to parse a variable as a specific type
fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value.parse().map(Some).map_err(|e: T::Err| ConfigError::Parse {
            name,
            reason: e.to_string(),
            value,
        }),
        None => Ok(None),
    }
}
