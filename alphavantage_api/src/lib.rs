//! Typed client for the Alpha Vantage daily time-series endpoint.

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{DailySeriesQuery, OutputSize, Query};
