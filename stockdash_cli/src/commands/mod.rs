//! CLI subcommand implementations.

pub mod chart;
pub mod dashboard;
pub mod export;
pub mod history;
pub mod profile;

use anyhow::Result;
use clap::Args;
use stockdash_lib::yahoo_quotes_api::Client;
use stockdash_lib::{HistoricalDataFetcher, HistoryRequest, PriceTable};

/// Tickers, date range and frequency shared by every price subcommand.
#[derive(Args)]
pub struct RangeArgs {
    /// Ticker symbols (e.g. AAPL MSFT ^GSPC)
    #[arg(required = true)]
    pub tickers: Vec<String>,

    /// First day to include, dd/mm/yyyy (default: earliest available)
    #[arg(long)]
    pub start: Option<String>,

    /// Last day to include, dd/mm/yyyy (default: now)
    #[arg(long)]
    pub end: Option<String>,

    /// Bar frequency: daily, weekly or monthly
    #[arg(long, default_value = "daily")]
    pub freq: String,
}

impl RangeArgs {
    pub fn request(&self) -> Result<HistoryRequest> {
        Ok(HistoryRequest::from_args(
            self.tickers.as_slice(),
            self.start.as_deref(),
            self.end.as_deref(),
            &self.freq,
        )?)
    }
}

pub async fn fetch_table(args: &RangeArgs, client: &Client) -> Result<PriceTable> {
    let request = args.request()?;
    let table = HistoricalDataFetcher::new(client.clone())
        .fetch(&request)
        .await?;
    if table.is_empty() {
        tracing::warn!("no price rows in the requested range");
    }
    Ok(table)
}
