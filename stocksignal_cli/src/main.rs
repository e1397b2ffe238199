mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stocksignal_lib::{Config, QuoteFetcher};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "stocksignal")]
#[command(about = "RSI-based buy/sell/hold signals from Alpha Vantage daily closes")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Alpha Vantage API key (defaults to ALPHAVANTAGE_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single ticker symbol
    Analyze(commands::analyze::AnalyzeArgs),
    /// Interactive form: enter symbols one per line
    Prompt(commands::prompt::PromptArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stocksignal=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);
    let config = Config::resolve(cli.api_key.as_deref())?;
    let fetcher = QuoteFetcher::from_config(&config);

    match &cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, &fetcher, &format).await?,
        Commands::Prompt(args) => commands::prompt::run(args, fetcher, &format).await?,
    }

    Ok(())
}
