use alphavantage_api::{DailySeriesQuery, OutputSize, Query};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/query").unwrap()
}

#[test]
fn daily_query_defaults() {
    let url = DailySeriesQuery::new("AAPL").add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("function=TIME_SERIES_DAILY"));
    assert!(query.contains("symbol=AAPL"));
    assert!(query.contains("outputsize=compact"));
    assert!(!query.contains("apikey"));
}

#[test]
fn daily_query_normalizes_symbol() {
    let query = DailySeriesQuery::new("  brk.b ");
    assert_eq!(query.symbol, "BRK.B");
}

#[test]
fn daily_query_encodes_symbol() {
    let url = DailySeriesQuery::new("a&b=c").add_to_url(&base_url());
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("symbol".to_string(), "A&B=C".to_string())));
}

#[test]
fn daily_query_output_size() {
    let url = DailySeriesQuery::new("AAPL")
        .with_output_size(OutputSize::Full)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("outputsize=full"));
}

#[test]
fn output_size_display_and_default() {
    assert_eq!(OutputSize::Compact.to_string(), "compact");
    assert_eq!(OutputSize::Full.to_string(), "full");
    assert_eq!(OutputSize::default(), OutputSize::Compact);
}
