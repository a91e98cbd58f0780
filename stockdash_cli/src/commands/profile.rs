use anyhow::Result;
use clap::Args;
use stockdash_lib::validation::validate_ticker;
use stockdash_lib::yahoo_quotes_api::Client;
use stockdash_lib::ScrapeClient;

use crate::output::{
    print_json, print_profile_csv, print_profile_markdown, print_profile_table, OutputFormat,
};

#[derive(Args)]
pub struct ProfileArgs {
    /// Ticker symbol (e.g. AAPL)
    pub ticker: String,
}

pub async fn run(args: &ProfileArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let ticker = validate_ticker(&args.ticker)?;
    let profile = ScrapeClient::new(client.clone())
        .company_profile(&ticker)
        .await?;
    match format {
        OutputFormat::Table => print_profile_table(&ticker, profile.as_ref()),
        OutputFormat::Json => print_json(&profile)?,
        OutputFormat::Csv => print_profile_csv(&ticker, profile.as_ref())?,
        OutputFormat::Markdown => print_profile_markdown(&ticker, profile.as_ref()),
    }
    Ok(())
}
