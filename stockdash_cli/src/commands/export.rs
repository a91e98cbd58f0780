use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use stockdash_lib::yahoo_quotes_api::Client;

use super::{fetch_table, RangeArgs};
use crate::output::write_export_csv;

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Directory to write the CSV file into
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

pub async fn run(args: &ExportArgs, client: &Client) -> Result<()> {
    let table = fetch_table(&args.range, client).await?;
    let path = write_export_csv(&table, &args.dir)?;
    tracing::info!("Wrote {} rows to {}", table.len(), path.display());
    println!("{}", path.display());
    Ok(())
}
