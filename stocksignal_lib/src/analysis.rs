//! The analysis pipeline: validate a symbol, fetch its closes, evaluate them.
//!
//! Every failure is reduced to one [`AnalysisError`] here, so callers only
//! ever see a complete [`AnalysisResult`] or a user-facing message.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AnalysisError;
use crate::fetcher::{QuoteFetcher, QuoteSeries};
use crate::signal::{evaluate, Decision, Evaluation};
use crate::validation::validate_symbol;

/// Outcome of one successful analysis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub symbol: String,
    /// Most recent close.
    pub price: f64,
    /// RSI rounded to one decimal.
    pub rsi: f64,
    pub decision: Decision,
    /// Trading day of `price`.
    pub as_of: NaiveDate,
    /// Number of closes the series held (at most 30).
    pub closes: usize,
}

impl AnalysisResult {
    pub fn new(series: &QuoteSeries, evaluation: Evaluation) -> Self {
        let latest = series.latest();
        Self {
            symbol: series.symbol().to_string(),
            price: latest.close,
            rsi: evaluation.rsi,
            decision: evaluation.decision,
            as_of: latest.date,
            closes: series.len(),
        }
    }

    pub fn interpretation(&self) -> &'static str {
        self.decision.interpretation()
    }
}

/// Evaluates an already fetched series.
pub fn analyze_series(series: &QuoteSeries) -> AnalysisResult {
    AnalysisResult::new(series, evaluate(&series.closes()))
}

/// Runs one full request cycle for user input `input`.
pub async fn analyze(
    fetcher: &QuoteFetcher,
    input: &str,
) -> Result<AnalysisResult, AnalysisError> {
    let symbol = validate_symbol(input)?;
    let series = fetcher.fetch_daily_closes(&symbol).await?;
    let result = analyze_series(&series);
    tracing::info!(
        "{}: price {:.2} rsi {:.1} -> {}",
        result.symbol,
        result.price,
        result.rsi,
        result.decision
    );
    Ok(result)
}
