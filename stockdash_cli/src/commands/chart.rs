use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use stockdash_lib::chart::{candlestick_chart, line_chart, render_html, Figure};
use stockdash_lib::yahoo_quotes_api::Client;
use stockdash_lib::PriceField;

use super::{fetch_table, RangeArgs};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    Line,
    Candlestick,
}

#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Chart type
    #[arg(long, value_enum, default_value = "line")]
    pub kind: ChartKind,

    /// Plotted column for line charts: open, high, low, close, adj-close, volume
    #[arg(long, default_value = "close")]
    pub field: String,

    /// Output file; a .json extension writes the Plotly figure, anything else HTML
    #[arg(long, default_value = "chart.html")]
    pub out: PathBuf,
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn write_figure(figure: &Figure, out: &Path) -> Result<()> {
    let contents = if is_json_path(out) {
        serde_json::to_string_pretty(figure)?
    } else {
        render_html(figure)?
    };
    std::fs::write(out, contents)?;
    Ok(())
}

pub async fn run(args: &ChartArgs, client: &Client) -> Result<()> {
    let field: PriceField = args.field.parse()?;
    let table = fetch_table(&args.range, client).await?;
    if table.is_empty() {
        bail!("nothing to chart");
    }
    let figure = match args.kind {
        ChartKind::Line => line_chart(&table, field),
        ChartKind::Candlestick => candlestick_chart(&table),
    };
    write_figure(&figure, &args.out)?;
    tracing::info!("Wrote {:?} chart to {}", args.kind, args.out.display());
    println!("{}", args.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdash_lib::chart::{LineTrace, Trace};

    fn figure() -> Figure {
        let mut fig = line_chart(&Default::default(), PriceField::Close);
        fig.data.push(Trace::Scatter(LineTrace {
            name: "AAPL".into(),
            mode: "lines",
            x: vec![],
            y: vec![],
        }));
        fig
    }

    #[test]
    fn test_is_json_path() {
        assert!(is_json_path(Path::new("out/fig.json")));
        assert!(is_json_path(Path::new("FIG.JSON")));
        assert!(!is_json_path(Path::new("fig.html")));
        assert!(!is_json_path(Path::new("fig")));
    }

    #[test]
    fn test_write_figure_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("fig.json");
        write_figure(&figure(), &out).unwrap();
        let val: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(val["data"][0]["name"], "AAPL");
        assert_eq!(val["layout"]["title"]["text"], "Close Time Series");
    }

    #[test]
    fn test_write_figure_html() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("fig.html");
        write_figure(&figure(), &out).unwrap();
        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Plotly.newPlot"));
    }
}
