use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use stockdash_lib::chart::dashboard_html;
use stockdash_lib::yahoo_quotes_api::Client;
use stockdash_lib::{PriceField, ScrapeClient};

use super::{fetch_table, RangeArgs};

#[derive(Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Column plotted on the line chart
    #[arg(long, default_value = "close")]
    pub field: String,

    /// Output HTML file
    #[arg(long, default_value = "dashboard.html")]
    pub out: PathBuf,
}

pub async fn run(args: &DashboardArgs, client: &Client) -> Result<()> {
    let field: PriceField = args.field.parse()?;
    let table = fetch_table(&args.range, client).await?;
    let Some(first) = table.tickers().first().map(|t| t.to_string()) else {
        bail!("nothing to show");
    };

    // profile failures degrade to the N/A summary
    let profile = match ScrapeClient::new(client.clone())
        .company_profile(&first)
        .await
    {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("profile unavailable for {}: {}", first, e);
            None
        }
    };

    let html = dashboard_html(profile.as_ref(), &table, field)?;
    std::fs::write(&args.out, html)?;
    tracing::info!("Wrote dashboard to {}", args.out.display());
    println!("{}", args.out.display());
    Ok(())
}
