use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Selects the log line format.
pub const LOG_FORMAT_VAR: &str = "TICKERLIST_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout stays JSON.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. A second call is a
/// no-op.
pub fn init_tracing() {
    let format = LogFormat::parse(std::env::var(LOG_FORMAT_VAR).ok().as_deref());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init(),
    };

    if let Err(error) = result {
        eprintln!("warning: logging not initialized: {error}");
    }
}
