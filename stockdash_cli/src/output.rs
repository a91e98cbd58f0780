use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Serialize;
use stockdash_lib::{CompanyProfile, PriceTable};
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
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => bail!(
                "unknown output format '{}': expected table, json, csv or markdown",
                other
            ),
        }
    }
}

#[derive(Tabled, Serialize)]
struct PriceRowOut {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Open")]
    #[serde(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    #[serde(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    #[serde(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    #[serde(rename = "Close")]
    close: String,
    #[tabled(rename = "Adj Close")]
    #[serde(rename = "Adj Close")]
    adj_close: String,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
}

#[derive(Tabled, Serialize)]
struct ProfileRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Sector")]
    #[serde(rename = "Sector")]
    sector: String,
    #[tabled(rename = "Industry")]
    #[serde(rename = "Industry")]
    industry: String,
}

/// Full-precision row for the spreadsheet export; `None` becomes an empty cell.
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Ticker")]
    ticker: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: Option<f64>,
    #[serde(rename = "High")]
    high: Option<f64>,
    #[serde(rename = "Low")]
    low: Option<f64>,
    #[serde(rename = "Close")]
    close: Option<f64>,
    #[serde(rename = "Adj Close")]
    adj_close: Option<f64>,
    #[serde(rename = "Volume")]
    volume: Option<u64>,
}

fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

fn build_price_rows(table: &PriceTable) -> Vec<PriceRowOut> {
    table
        .iter()
        .map(|r| PriceRowOut {
            ticker: r.ticker.clone(),
            date: r.date.format("%Y-%m-%d").to_string(),
            open: format_price(r.open),
            high: format_price(r.high),
            low: format_price(r.low),
            close: format_price(r.close),
            adj_close: format_price(r.adj_close),
            volume: r.volume.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
        })
        .collect()
}

fn build_profile_rows(ticker: &str, profile: Option<&CompanyProfile>) -> Vec<ProfileRow> {
    let row = match profile {
        Some(p) => ProfileRow {
            ticker: p.ticker.clone(),
            name: p.name.clone(),
            sector: p.sector.clone(),
            industry: p.industry.clone(),
        },
        None => ProfileRow {
            ticker: ticker.to_uppercase(),
            name: "N/A".into(),
            sector: "N/A".into(),
            industry: "N/A".into(),
        },
    };
    vec![row]
}

// -- Table output --

pub fn print_prices_table(table: &PriceTable) {
    println!("{}", Table::new(build_price_rows(table)));
}

pub fn print_profile_table(ticker: &str, profile: Option<&CompanyProfile>) {
    println!("{}", Table::new(build_profile_rows(ticker, profile)));
}

// -- Markdown output --

pub fn print_prices_markdown(table: &PriceTable) {
    let mut out = Table::new(build_price_rows(table));
    out.with(Style::markdown());
    println!("{}", out);
}

pub fn print_profile_markdown(ticker: &str, profile: Option<&CompanyProfile>) {
    let mut out = Table::new(build_profile_rows(ticker, profile));
    out.with(Style::markdown());
    println!("{}", out);
}

// -- CSV output --

pub fn print_prices_csv(table: &PriceTable) -> Result<()> {
    write_export_rows(table, std::io::stdout())
}

pub fn print_profile_csv(ticker: &str, profile: Option<&CompanyProfile>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_profile_rows(ticker, profile) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

// -- File export --

fn write_export_rows<W: std::io::Write>(table: &PriceTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if table.is_empty() {
        wtr.write_record([
            "Ticker", "Date", "Open", "High", "Low", "Close", "Adj Close", "Volume",
        ])?;
    }
    for r in table {
        wtr.serialize(ExportRow {
            ticker: &r.ticker,
            date: r.date.format("%Y-%m-%d").to_string(),
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            adj_close: r.adj_close,
            volume: r.volume,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// `AAPL.csv`, or `AAPL_MSFT.csv` for several tickers.
pub fn export_file_name(tickers: &[&str]) -> String {
    format!("{}.csv", tickers.join("_"))
}

/// Writes the table to `{dir}/{tickers}.csv` and returns the path.
pub fn write_export_csv(table: &PriceTable, dir: &Path) -> Result<PathBuf> {
    if table.is_empty() {
        bail!("no rows to export");
    }
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(&table.tickers()));
    let file = std::fs::File::create(&path)?;
    write_export_rows(table, file)?;
    Ok(path)
}
