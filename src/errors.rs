//! Error types for the API client and configuration

use thiserror::Error;

/// Failure talking to the administration API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is taken from the body when it has one
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Text shown to the operator
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http(e) if e.is_timeout() => "The server did not respond in time".to_string(),
            ApiError::Http(e) if e.is_connect() => "Could not connect to the server".to_string(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Invalid configuration value
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse environment variable {name} = '{value}': {reason}")]
    Parse {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("API URL must start with http:// or https://, got '{0}'")]
    InvalidApiUrl(String),
}
