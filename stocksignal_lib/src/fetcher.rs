//! Daily close retrieval and provider response classification.

use alphavantage_api::types::DailySeriesResponse;
use alphavantage_api::{Client, DailySeriesQuery};
use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Config;
use crate::error::AnalysisError;

/// Maximum number of closes kept from a compact response.
pub const MAX_SERIES_LEN: usize = 30;

/// One trading day's close.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuotePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Closing prices for one symbol, most recent first, as the provider ordered them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuoteSeries {
    symbol: String,
    points: Vec<QuotePoint>,
}

impl QuoteSeries {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[QuotePoint] {
        &self.points
    }

    /// The most recent close. Always present: a series is never built empty.
    pub fn latest(&self) -> &QuotePoint {
        &self.points[0]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Fetches daily closes from Alpha Vantage and turns every outcome into
/// either a [`QuoteSeries`] or one [`AnalysisError`].
pub struct QuoteFetcher {
    client: Client,
}

impl QuoteFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = match &config.base_url {
            Some(base_url) => Client::with_base_url(base_url, &config.api_key),
            None => Client::new(&config.api_key),
        };
        Self::new(client.with_timeout(config.timeout))
    }

    /// Issues exactly one request for `symbol`. No retries, no caching.
    pub async fn fetch_daily_closes(&self, symbol: &str) -> Result<QuoteSeries, AnalysisError> {
        let query = DailySeriesQuery::new(symbol);
        tracing::debug!("fetching daily closes for {}", query.symbol);
        let response = self.client.get_daily_series(&query).await?;
        classify(&query.symbol, response).inspect_err(|e| {
            tracing::warn!("{} rejected by provider: {}", query.symbol, e.kind());
        })
    }
}

/// Maps a decoded provider body to a series or an error. Checks run in a
/// fixed order: unknown symbol, usage notice, missing series, then parsing.
pub fn classify(
    symbol: &str,
    response: DailySeriesResponse,
) -> Result<QuoteSeries, AnalysisError> {
    if has_text(&response.error_message) {
        return Err(AnalysisError::NotFound {
            symbol: symbol.to_string(),
        });
    }
    if has_text(&response.note) || has_text(&response.information) {
        return Err(AnalysisError::RateLimited);
    }

    let series = match response.time_series {
        Some(series) if !series.is_empty() => series,
        _ => return Err(AnalysisError::NoData),
    };

    let points = series
        .iter()
        .take(MAX_SERIES_LEN)
        .map(|(date, bar)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            let close = bar.close()?;
            Some(QuotePoint { date, close })
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            tracing::warn!("{}: unreadable entry in daily series", symbol);
            AnalysisError::NoData
        })?;

    Ok(QuoteSeries {
        symbol: symbol.to_string(),
        points,
    })
}

fn has_text(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}
