use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use stocksignal_lib::{AnalysisError, AnalysisResult, View};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct AnalysisRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "RSI")]
    #[serde(rename = "RSI")]
    rsi: String,
    #[tabled(rename = "Signal")]
    #[serde(rename = "Signal")]
    decision: String,
    #[tabled(rename = "As Of")]
    #[serde(rename = "As Of")]
    as_of: String,
}

/// JSON shape of a form state change in the interactive session.
#[derive(Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
enum ViewJson<'a> {
    Loading { symbol: &'a str },
    Success { result: &'a AnalysisResult },
    Failure { error: ErrorJson },
}

#[derive(Serialize)]
struct ErrorJson {
    kind: &'static str,
    message: String,
}

impl From<&AnalysisError> for ErrorJson {
    fn from(e: &AnalysisError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

// -- Row builders --

fn build_analysis_rows(results: &[AnalysisResult]) -> Vec<AnalysisRow> {
    results
        .iter()
        .map(|r| AnalysisRow {
            symbol: r.symbol.clone(),
            price: format_price(r.price),
            rsi: format_rsi(r.rsi),
            decision: r.decision.to_string(),
            as_of: r.as_of.to_string(),
        })
        .collect()
}

// -- Writers --

/// Renders one result in `format`. Table and markdown add the interpretation line.
pub fn write_analysis<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    format: &OutputFormat,
) -> Result<()> {
    let rows = build_analysis_rows(std::slice::from_ref(result));
    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", Table::new(rows))?;
            writeln!(out, "{}", result.interpretation())?;
        }
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            writeln!(out, "{}", table)?;
            writeln!(out)?;
            writeln!(out, "> {}", result.interpretation())?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => write_json(out, result)?,
    }
    Ok(())
}

/// Renders a form state. `Idle` renders nothing.
pub fn write_view<W: Write>(out: &mut W, view: &View, format: &OutputFormat) -> Result<()> {
    if *format == OutputFormat::Json {
        let json = match view {
            View::Idle => return Ok(()),
            View::Loading { symbol, .. } => ViewJson::Loading { symbol },
            View::Success(result) => ViewJson::Success { result },
            View::Failure(error) => ViewJson::Failure {
                error: error.into(),
            },
        };
        return write_json_line(out, &json);
    }

    match view {
        View::Idle => {}
        View::Loading { symbol, .. } => writeln!(out, "Analyzing {}...", symbol)?,
        View::Success(result) => write_analysis(out, result, format)?,
        View::Failure(error) => writeln!(out, "{}", error)?,
    }
    Ok(())
}

// -- JSON output --

pub fn write_json<W: Write, T: Serialize>(out: &mut W, data: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, data)?;
    writeln!(out)?;
    Ok(())
}

fn write_json_line<W: Write, T: Serialize>(out: &mut W, data: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, data)?;
    writeln!(out)?;
    Ok(())
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

pub fn format_rsi(rsi: f64) -> String {
    format!("{:.1}", rsi)
}
