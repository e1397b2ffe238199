//! Error types for the Alpha Vantage client.

/// Errors raised while talking to the Alpha Vantage REST endpoint.
///
/// Provider-level conditions (unknown symbol, usage notices) arrive inside an
/// HTTP 200 JSON body and are therefore not errors at this layer; they are
/// exposed on [`crate::types::DailySeriesResponse`] for the caller to classify.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be completed: network failure, timeout, or a
    /// body that is not valid JSON.
    #[error("Request failed")]
    RequestFailed,
    /// The provider answered with a non-success HTTP status.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}
