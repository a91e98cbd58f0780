//! Price rows keyed by (ticker, date).

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StockDashError;

/// One bar of a ticker's history.
///
/// Prices and volume are `None` where the source reported `null` for that
/// session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    pub ticker: String,
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
}

impl PriceRow {
    /// The value of one column as a float, for charting.
    pub fn value(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
            PriceField::AdjClose => self.adj_close,
            PriceField::Volume => self.volume.map(|v| v as f64),
        }
    }
}

/// A plottable column of [`PriceRow`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceField {
    Open,
    High,
    Low,
    #[default]
    Close,
    AdjClose,
    Volume,
}

impl PriceField {
    /// Column header as written by the source and the exporter.
    pub fn label(&self) -> &'static str {
        match self {
            PriceField::Open => "Open",
            PriceField::High => "High",
            PriceField::Low => "Low",
            PriceField::Close => "Close",
            PriceField::AdjClose => "Adj Close",
            PriceField::Volume => "Volume",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceField {
    type Err = StockDashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match key.as_str() {
            "open" => Ok(PriceField::Open),
            "high" => Ok(PriceField::High),
            "low" => Ok(PriceField::Low),
            "close" => Ok(PriceField::Close),
            "adjclose" => Ok(PriceField::AdjClose),
            "volume" => Ok(PriceField::Volume),
            _ => Err(StockDashError::InvalidInput(format!(
                "unknown price field '{}'. Valid fields: open, high, low, close, adj-close, volume",
                s
            ))),
        }
    }
}

/// Rows grouped by ticker (in request order), chronological within each ticker.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceTable {
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Concatenates per-ticker series into one table.
    ///
    /// Each series is sorted by date. Fails if a (ticker, date) pair repeats,
    /// within a series or across series.
    pub fn from_series(series: Vec<Vec<PriceRow>>) -> Result<Self, StockDashError> {
        let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();
        let mut rows = Vec::with_capacity(series.iter().map(Vec::len).sum());
        for mut chunk in series {
            chunk.sort_by_key(|r| r.date);
            for row in chunk {
                if !seen.insert((row.ticker.clone(), row.date)) {
                    return Err(StockDashError::Parse(format!(
                        "duplicate row for {} on {}",
                        row.ticker, row.date
                    )));
                }
                rows.push(row);
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceRow> {
        self.rows.iter()
    }

    /// Distinct tickers in table order.
    pub fn tickers(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for row in &self.rows {
            if out.last() != Some(&row.ticker.as_str()) {
                out.push(row.ticker.as_str());
            }
        }
        out
    }

    /// All rows of one ticker, oldest first. Empty if the ticker is absent.
    pub fn series(&self, ticker: &str) -> &[PriceRow] {
        let Some(start) = self.rows.iter().position(|r| r.ticker == ticker) else {
            return &[];
        };
        let len = self.rows[start..]
            .iter()
            .take_while(|r| r.ticker == ticker)
            .count();
        &self.rows[start..start + len]
    }

    /// Row for the (ticker, date) key.
    pub fn get(&self, ticker: &str, date: NaiveDate) -> Option<&PriceRow> {
        let series = self.series(ticker);
        series
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|idx| &series[idx])
    }

    /// Earliest and latest date across all tickers.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

impl<'a> IntoIterator for &'a PriceTable {
    type Item = &'a PriceRow;
    type IntoIter = std::slice::Iter<'a, PriceRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
