use anyhow::Result;
use clap::Args;
use stockdash_lib::yahoo_quotes_api::Client;

use super::{fetch_table, RangeArgs};
use crate::output::{
    print_json, print_prices_csv, print_prices_markdown, print_prices_table, OutputFormat,
};

#[derive(Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub range: RangeArgs,
}

pub async fn run(args: &HistoryArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let table = fetch_table(&args.range, client).await?;
    match format {
        OutputFormat::Table => print_prices_table(&table),
        OutputFormat::Json => print_json(&table)?,
        OutputFormat::Csv => print_prices_csv(&table)?,
        OutputFormat::Markdown => print_prices_markdown(&table),
    }
    Ok(())
}
