use anyhow::Result;
use clap::Args;
use stocksignal_lib::{analyze, QuoteFetcher};

use crate::output::{write_analysis, OutputFormat};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Ticker symbol (e.g. AAPL, MSFT, GOOGL)
    pub symbol: String,
}

pub async fn run(args: &AnalyzeArgs, fetcher: &QuoteFetcher, format: &OutputFormat) -> Result<()> {
    let result = analyze(fetcher, &args.symbol).await?;
    let stdout = std::io::stdout();
    write_analysis(&mut stdout.lock(), &result, format)?;
    Ok(())
}
