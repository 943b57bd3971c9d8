//! Environment-backed API configuration.
//!
//! Values come from the process environment after a local `.env` file (if
//! any) has been merged in. Nothing here touches the network, so a missing
//! key is reported before the first request is attempted.

use std::fmt::{Debug, Formatter};

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "API_KEY";
pub const API_HOST_VAR: &str = "API_HOST";

/// Base URL of the Polygon-style reference API when `API_HOST` is unset.
pub const DEFAULT_REFERENCE_HOST: &str = "https://api.polygon.io";

#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    api_key: String,
    api_host: Option<String>,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>, api_host: Option<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::Missing { var: API_KEY_VAR });
        }

        let api_host = match api_host.map(|host| host.trim().to_owned()) {
            Some(host) if host.is_empty() => None,
            Some(host) => Some(validate_base_url(host)?),
            None => None,
        };

        Ok(Self { api_key, api_host })
    }

    /// Reads `API_KEY` / `API_HOST`, loading `.env` from the working directory first.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::Missing { var: API_KEY_VAR })?;
        Self::new(api_key, lookup(API_HOST_VAR))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Host of the symbol list API. Required; there is no public default.
    pub fn require_host(&self) -> Result<&str, ConfigError> {
        self.api_host
            .as_deref()
            .ok_or(ConfigError::Missing { var: API_HOST_VAR })
    }

    /// Host of the reference API, falling back to [`DEFAULT_REFERENCE_HOST`].
    pub fn reference_host(&self) -> &str {
        self.api_host.as_deref().unwrap_or(DEFAULT_REFERENCE_HOST)
    }
}

impl Debug for ApiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("api_host", &self.api_host)
            .finish()
    }
}

fn validate_base_url(host: String) -> Result<String, ConfigError> {
    let lower = host.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl { value: host });
    }
    Ok(host)
}

/// Joins a base URL and a relative path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
