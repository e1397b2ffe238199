use url::Url;

use super::{common::QueryCommon, Query};

/// Query for the `TIME_SERIES_DAILY` function: one bar per trading day,
/// keyed by date, most recent first.
#[derive(Clone, Debug)]
pub struct DailySeriesQuery {
    pub common: QueryCommon,
    pub symbol: String,
}

impl Query for DailySeriesQuery {
    fn function(&self) -> &'static str {
        "TIME_SERIES_DAILY"
    }

    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("function", self.function())
            .append_pair("symbol", &self.symbol);
        self.common.add_to_url(&url)
    }
}

impl DailySeriesQuery {
    /// Builds a compact daily query for `symbol`. The symbol is trimmed and
    /// uppercased; the provider treats tickers case-insensitively but echoes
    /// them back in the case it was given.
    pub fn new(symbol: &str) -> Self {
        Self {
            common: QueryCommon::default(),
            symbol: symbol.trim().to_uppercase(),
        }
    }
}
