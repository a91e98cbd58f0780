mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stockdash_lib::Settings;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "stockdash")]
#[command(about = "Fetch historical stock prices and company profiles, and chart them")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Base URL of the quotes download endpoint (overrides STOCKDASH_HISTORY_URL)
    #[arg(long, global = true)]
    history_url: Option<String>,

    /// Base URL of the profile pages (overrides STOCKDASH_PROFILE_URL)
    #[arg(long, global = true)]
    profile_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print historical prices for one or more tickers
    History(commands::history::HistoryArgs),
    /// Print a company's name, sector and industry
    Profile(commands::profile::ProfileArgs),
    /// Write a line or candlestick chart to HTML or JSON
    Chart(commands::chart::ChartArgs),
    /// Write historical prices to a CSV file
    Export(commands::export::ExportArgs),
    /// Write an HTML dashboard with profile, charts and data
    Dashboard(commands::dashboard::DashboardArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stockdash=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output)?;

    let mut settings = Settings::from_env();
    if let Some(url) = &cli.history_url {
        settings = settings.with_history_url(url);
    }
    if let Some(url) = &cli.profile_url {
        settings = settings.with_profile_url(url);
    }
    let client = settings.build_client()?;

    match &cli.command {
        Commands::History(args) => commands::history::run(args, &client, &format).await?,
        Commands::Profile(args) => commands::profile::run(args, &client, &format).await?,
        Commands::Chart(args) => commands::chart::run(args, &client).await?,
        Commands::Export(args) => commands::export::run(args, &client).await?,
        Commands::Dashboard(args) => commands::dashboard::run(args, &client).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn history_args_parse() {
        let cli = Cli::try_parse_from([
            "stockdash", "history", "aapl", "msft", "--start", "01/01/2023", "--freq", "weekly",
            "--output", "json",
        ])
        .unwrap();
        assert_eq!(cli.output, "json");
        match cli.command {
            Commands::History(args) => {
                assert_eq!(args.range.tickers, vec!["aapl", "msft"]);
                assert_eq!(args.range.start.as_deref(), Some("01/01/2023"));
                assert_eq!(args.range.end, None);
                assert_eq!(args.range.freq, "weekly");
            }
            _ => panic!("expected history subcommand"),
        }
    }

    #[test]
    fn chart_requires_ticker() {
        assert!(Cli::try_parse_from(["stockdash", "chart", "--kind", "line"]).is_err());
    }

    #[test]
    fn chart_kind_parses() {
        let cli = Cli::try_parse_from([
            "stockdash", "chart", "AAPL", "--kind", "candlestick", "--out", "c.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Chart(args) => {
                assert_eq!(args.kind, commands::chart::ChartKind::Candlestick);
                assert_eq!(args.field, "close");
            }
            _ => panic!("expected chart subcommand"),
        }
    }

    #[test]
    fn url_overrides_are_global() {
        let cli = Cli::try_parse_from([
            "stockdash", "profile", "AAPL", "--profile-url", "http://127.0.0.1:9000",
        ])
        .unwrap();
        assert_eq!(cli.profile_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(cli.history_url, None);
    }
}
