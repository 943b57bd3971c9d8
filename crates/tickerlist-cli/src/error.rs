use thiserror::Error;
use tickerlist_core::{ConfigError, FetchError, FilterError, ReportError};
use tickerlist_export::ExportError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Fetch(FetchError::Config(_) | FetchError::InvalidRequest(_)) => 2,
            Self::Fetch(_) => 3,
            Self::Filter(_) => 2,
            Self::Report(_) => 4,
            Self::Serialization(_) => 4,
            Self::Export(_) => 10,
            Self::Io(_) => 10,
        }
    }
}
