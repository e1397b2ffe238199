//! Library layer for stocksignal: quote fetching, RSI evaluation, and the
//! form state machine shared by every host.
//!
//! Wraps the `alphavantage_api` client, classifies provider responses into a
//! closed set of user-facing errors, and turns a closing-price series into a
//! buy/sell/hold recommendation.

pub mod analysis;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod signal;
pub mod state;
pub mod validation;

pub use alphavantage_api;

pub use analysis::{analyze, analyze_series, AnalysisResult};
pub use config::{Config, ConfigError};
pub use error::AnalysisError;
pub use fetcher::{QuoteFetcher, QuotePoint, QuoteSeries};
pub use signal::{evaluate, Decision, Evaluation};
pub use state::{reduce, Event, FormState, RequestId, RequestSequence, View};
