use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::MetaData;

/// Top-level body returned by `TIME_SERIES_DAILY`.
///
/// The provider reports unknown symbols and usage-limit notices with HTTP 200
/// and a single message field instead of the series, so every field is
/// optional. The series keeps the provider's key order (most recent first).
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DailySeriesResponse {
    #[serde(rename = "Meta Data", default)]
    pub meta_data: Option<MetaData>,
    #[serde(rename = "Time Series (Daily)", default)]
    pub time_series: Option<IndexMap<String, DailyBar>>,
    #[serde(rename = "Error Message", default)]
    pub error_message: Option<String>,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(rename = "Information", default)]
    pub information: Option<String>,
}

impl DailySeriesResponse {
    /// Number of dated bars in the payload, zero when the series is absent.
    pub fn len(&self) -> usize {
        self.time_series.as_ref().map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One trading day. Values arrive as decimal strings.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct DailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}

impl DailyBar {
    /// The closing price, or `None` when the field is missing or not a number.
    pub fn close(&self) -> Option<f64> {
        self.close.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}
