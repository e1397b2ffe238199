//! HTTP client for the Alpha Vantage REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{DailySeriesQuery, Query},
    types::DailySeriesResponse,
    Error,
};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("stocksignal/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Alpha Vantage REST API.
///
/// The access key is supplied by the caller and appended to every request
/// as the `apikey` parameter. Each request builds a fresh `reqwest::Client`
/// with the configured timeout.
pub struct Client {
    /// Base URL for the API. Defaults to `https://www.alphavantage.co`.
    base_api_url: String,
    api_key: String,
    timeout: Duration,
}

impl Client {
    /// Creates a new client pointing at the production Alpha Vantage API.
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url("https://www.alphavantage.co", api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}/query", &self.base_api_url).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        let mut url = query.add_to_url(&url);
        url.query_pairs_mut().append_pair("apikey", &self.api_key);
        Ok(url)
    }

    async fn get<T, Q>(&self, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(query)?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        tracing::debug!("GET {} ({})", query.function(), self.base_api_url);
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                // reqwest includes the full URL in its message, which carries the key
                tracing::error!("Failed to get {}: {}", query.function(), e.without_url());
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e.without_url());
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse {}: {} | body: {}", query.function(), e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Fetches the daily time series for the query's symbol.
    ///
    /// Unknown symbols and usage notices still return `Ok`; inspect
    /// `error_message`, `note` and `information` on the response.
    pub async fn get_daily_series(
        &self,
        query: &DailySeriesQuery,
    ) -> Result<DailySeriesResponse, Error> {
        self.get::<DailySeriesResponse, DailySeriesQuery>(query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_key_and_function() {
        let client = Client::with_base_url("http://localhost:1234/", "demo");
        let url = client.get_url(&DailySeriesQuery::new("aapl")).unwrap();
        assert_eq!(url.path(), "/query");
        let query = url.query().unwrap();
        assert!(query.contains("function=TIME_SERIES_DAILY"));
        assert!(query.contains("symbol=AAPL"));
        assert!(query.contains("outputsize=compact"));
        assert!(query.ends_with("apikey=demo"));
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_cuts_long_bodies() {
        let long = "x".repeat(2500);
        let out = truncate_body(&long);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(out.len(), 2000 + "...[truncated]".len());
    }
}
