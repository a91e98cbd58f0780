//! Plotly figure builders and HTML rendering.
//!
//! Figures are plain serde structures matching plotly.js' `{data, layout}`
//! JSON, so they can be written as JSON or embedded in a page.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::StockDashError;
use crate::scrape::CompanyProfile;
use crate::table::{PriceField, PriceTable};
use crate::validation::format_date;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(LineTrace),
    Candlestick(CandlestickTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub mode: &'static str,
    pub x: Vec<NaiveDate>,
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandlestickTrace {
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: XAxis,
    pub yaxis: YAxis,
    pub legend: Legend,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct XAxis {
    pub title: Title,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub rangeslider: RangeSlider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangeselector: Option<RangeSelector>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YAxis {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeSelector {
    pub buttons: Vec<RangeButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub step: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stepmode: Option<&'static str>,
}

impl RangeButton {
    fn backward(count: u32, label: &'static str, step: &'static str) -> Self {
        Self {
            count: Some(count),
            label: Some(label),
            step,
            stepmode: Some("backward"),
        }
    }
}

/// 1m, 6m, YTD, 1y, all.
pub fn range_buttons() -> Vec<RangeButton> {
    vec![
        RangeButton::backward(1, "1m", "month"),
        RangeButton::backward(6, "6m", "month"),
        RangeButton {
            count: Some(1),
            label: Some("YTD"),
            step: "year",
            stepmode: Some("todate"),
        },
        RangeButton::backward(1, "1y", "year"),
        RangeButton {
            count: None,
            label: None,
            step: "all",
            stepmode: None,
        },
    ]
}

/// Fills interior gaps by linear interpolation between the nearest known
/// neighbours. Leading and trailing gaps stay empty; pandas' forward-only
/// `interpolate` would instead repeat the last known value into a trailing gap.
pub fn interpolate(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = values.to_vec();
    let mut last_known: Option<(usize, f64)> = None;
    for (idx, value) in values.iter().enumerate() {
        let Some(v) = *value else { continue };
        if let Some((prev_idx, prev)) = last_known {
            let span = (idx - prev_idx) as f64;
            for gap in prev_idx + 1..idx {
                let t = (gap - prev_idx) as f64 / span;
                out[gap] = Some(prev + (v - prev) * t);
            }
        }
        last_known = Some((idx, v));
    }
    out
}

/// One interpolated line per ticker for `field`, with range slider and selector.
pub fn line_chart(table: &PriceTable, field: PriceField) -> Figure {
    let data = table
        .tickers()
        .into_iter()
        .map(|ticker| {
            let series = table.series(ticker);
            let raw: Vec<Option<f64>> = series.iter().map(|r| r.value(field)).collect();
            Trace::Scatter(LineTrace {
                name: ticker.to_string(),
                mode: "lines",
                x: series.iter().map(|r| r.date).collect(),
                y: interpolate(&raw),
            })
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: Title {
                text: format!("{} Time Series", field.label()),
            },
            xaxis: XAxis {
                title: Title {
                    text: "Date".into(),
                },
                kind: "date",
                rangeslider: RangeSlider { visible: true },
                rangeselector: Some(RangeSelector {
                    buttons: range_buttons(),
                }),
            },
            yaxis: YAxis {
                title: Title {
                    text: field.label().into(),
                },
            },
            legend: Legend {
                title: Title {
                    text: "Ticker".into(),
                },
            },
        },
    }
}

/// One OHLC candlestick trace per ticker.
pub fn candlestick_chart(table: &PriceTable) -> Figure {
    let data = table
        .tickers()
        .into_iter()
        .map(|ticker| {
            let series = table.series(ticker);
            Trace::Candlestick(CandlestickTrace {
                name: ticker.to_string(),
                x: series.iter().map(|r| r.date).collect(),
                open: series.iter().map(|r| r.open).collect(),
                high: series.iter().map(|r| r.high).collect(),
                low: series.iter().map(|r| r.low).collect(),
                close: series.iter().map(|r| r.close).collect(),
            })
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: Title {
                text: format!("{} OHLC", table.tickers().join(", ")),
            },
            xaxis: XAxis {
                title: Title {
                    text: "Date".into(),
                },
                kind: "date",
                rangeslider: RangeSlider { visible: false },
                rangeselector: None,
            },
            yaxis: YAxis {
                title: Title {
                    text: "Price".into(),
                },
            },
            legend: Legend {
                title: Title {
                    text: "Ticker".into(),
                },
            },
        },
    }
}

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// JSON safe to place inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String, StockDashError> {
    let json = serde_json::to_string(value)
        .map_err(|e| StockDashError::Parse(format!("figure serialization failed: {}", e)))?;
    Ok(json.replace("</", "<\\/"))
}

fn plot_script(div_id: &str, figure: &Figure) -> Result<String, StockDashError> {
    Ok(format!(
        "{{\n  const fig = {};\n  Plotly.newPlot({}, fig.data, fig.layout, {{responsive: true}});\n}}",
        script_json(figure)?,
        script_json(&div_id)?
    ))
}

/// Standalone page showing one figure.
pub fn render_html(figure: &Figure) -> Result<String, StockDashError> {
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
{script}
</script>
</body>
</html>
"#,
        title = escape_html(&figure.layout.title.text),
        cdn = PLOTLY_CDN,
        script = plot_script("chart", figure)?,
    ))
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

fn profile_section(profile: Option<&CompanyProfile>) -> String {
    let (name, sector, industry) = match profile {
        Some(p) => (p.name.as_str(), p.sector.as_str(), p.industry.as_str()),
        None => ("N/A", "N/A", "N/A"),
    };
    format!(
        "<table class=\"profile\">\n<tr><th>Name</th><th>Sector</th><th>Industry</th></tr>\n<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n</table>",
        escape_html(name),
        escape_html(sector),
        escape_html(industry)
    )
}

fn data_section(table: &PriceTable) -> String {
    let mut html = String::from(
        "<table class=\"data\">\n<tr><th>Ticker</th><th>Date</th><th>Open</th><th>High</th><th>Low</th><th>Close</th><th>Adj Close</th><th>Volume</th></tr>\n",
    );
    for row in table {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.ticker),
            format_date(row.date),
            format_cell(row.open),
            format_cell(row.high),
            format_cell(row.low),
            format_cell(row.close),
            format_cell(row.adj_close),
            row.volume.map(|v| v.to_string()).unwrap_or_default()
        ));
    }
    html.push_str("</table>");
    html
}

/// Two-tab dashboard page: charts (profile, line, candlestick) and the raw data.
pub fn dashboard_html(
    profile: Option<&CompanyProfile>,
    table: &PriceTable,
    field: PriceField,
) -> Result<String, StockDashError> {
    let tickers = table.tickers().join(", ");
    let line = line_chart(table, field);
    let candles = candlestick_chart(table);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
<style>
body {{ font-family: sans-serif; margin: 1.5em; }}
.tabs button {{ padding: 0.5em 1.5em; border: 1px solid #ccc; background: #f5f5f5; cursor: pointer; }}
.tabs button.active {{ background: #fff; border-bottom-color: #fff; }}
.tab {{ display: none; }}
.tab.active {{ display: block; }}
table {{ border-collapse: collapse; margin: 1em 0; }}
th, td {{ border: 1px solid #ddd; padding: 0.3em 0.8em; text-align: right; }}
</style>
</head>
<body>
<h2>{title}</h2>
<div class="tabs">
<button id="btn-charts" class="active" onclick="showTab('charts')">Charts</button>
<button id="btn-data" onclick="showTab('data')">Data</button>
</div>
<div id="tab-charts" class="tab active">
{profile}
<div id="line-chart" style="width:100%;height:60vh;"></div>
<div id="candlestick-chart" style="width:100%;height:60vh;"></div>
</div>
<div id="tab-data" class="tab">
{data}
</div>
<script>
function showTab(name) {{
  for (const id of ['charts', 'data']) {{
    document.getElementById('tab-' + id).classList.toggle('active', id === name);
    document.getElementById('btn-' + id).classList.toggle('active', id === name);
  }}
  window.dispatchEvent(new Event('resize'));
}}
{line}
{candles}
</script>
</body>
</html>
"#,
        title = escape_html(&tickers),
        cdn = PLOTLY_CDN,
        profile = profile_section(profile),
        data = data_section(table),
        line = plot_script("line-chart", &line)?,
        candles = plot_script("candlestick-chart", &candles)?,
    ))
}
