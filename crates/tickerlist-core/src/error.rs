use thiserror::Error;

use crate::http_client::HttpError;

/// Configuration problems detected before any network call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable '{var}' must be set")]
    Missing { var: &'static str },
    #[error("'{value}' is not an http(s) base url")]
    InvalidBaseUrl { value: String },
}

/// Failures while pulling pages from the market-data API.
///
/// Every variant aborts the whole fetch; records accumulated from earlier
/// pages are dropped with it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("transport error calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: HttpError,
    },

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("{endpoint} returned a payload that does not match its schema: {source}")]
    Schema {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// The OTC marker table could not be compiled into a matcher.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid marker table: {0}")]
    InvalidMarkers(#[from] regex::Error),
}

/// Detail-report conversion errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("timestamp must be RFC3339: '{value}'")]
    InvalidTimestamp { value: String },
    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("bar window ends past the supported date range: '{value}'")]
    WindowOutOfRange { value: String },
}
