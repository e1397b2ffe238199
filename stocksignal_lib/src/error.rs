//! Error types for the library layer.

use serde::Serialize;
use thiserror::Error;

/// The closed set of reasons an analysis can fail.
///
/// The `Display` text is the message shown to the user verbatim; no codes
/// or provider details leak past this type.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    /// The submitted symbol was blank after trimming.
    #[error("Enter a valid symbol")]
    EmptyInput,
    /// The provider does not know the symbol.
    #[error("Symbol \"{symbol}\" not found")]
    NotFound { symbol: String },
    /// The provider answered with a usage-limit notice.
    #[error("API limit reached. Wait 1 minute.")]
    RateLimited,
    /// The time series was missing, empty, or unreadable.
    #[error("No data received")]
    NoData,
    /// Transport failure, non-success status, or a body that is not JSON.
    #[error("Connection error")]
    ConnectionError,
}

impl AnalysisError {
    /// Short machine-friendly name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::NotFound { .. } => "not_found",
            Self::RateLimited => "rate_limited",
            Self::NoData => "no_data",
            Self::ConnectionError => "connection_error",
        }
    }
}

impl From<alphavantage_api::Error> for AnalysisError {
    fn from(e: alphavantage_api::Error) -> Self {
        tracing::debug!("provider request failed: {}", e);
        Self::ConnectionError
    }
}
