//! Historical quote retrieval and normalization.
//!
//! [`HistoricalDataFetcher::fetch`] downloads one CSV per ticker, validates
//! its schema and concatenates the results into a [`PriceTable`].

use chrono::{DateTime, NaiveDate, Utc};
use yahoo_quotes_api::types::Interval;
use yahoo_quotes_api::{Client, HistoryQuery};

use crate::error::StockDashError;
use crate::table::{PriceRow, PriceTable};
use crate::validation::{format_date, normalize_tickers, parse_date, parse_frequency};

/// Start date used when the caller does not name one.
pub const EARLIEST_AVAILABLE: NaiveDate = match NaiveDate::from_ymd_opt(1000, 1, 1) {
    Some(date) => date,
    None => panic!("invalid earliest-available date"),
};

/// Column headers the download must contain.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Date", "Open", "High", "Low", "Close", "Adj Close", "Volume",
];

const SOURCE_DATE_FORMAT: &str = "%Y-%m-%d";
const SECONDS_PER_DAY: i64 = 86_400;
const MISSING_VALUE: &str = "null";

/// Lower bound of a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangeStart {
    /// Everything the source holds (from [`EARLIEST_AVAILABLE`]).
    #[default]
    EarliestAvailable,
    On(NaiveDate),
}

/// Upper bound of a request (inclusive).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangeEnd {
    /// The instant the request is made.
    #[default]
    Now,
    On(NaiveDate),
}

/// Tickers, date range and frequency of one fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRequest {
    pub tickers: Vec<String>,
    pub start: RangeStart,
    pub end: RangeEnd,
    pub interval: Interval,
}

/// A request's bounds as calendar dates and as endpoint epoch seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub period1: i64,
    pub period2: i64,
}

impl HistoryRequest {
    /// A daily request for everything up to now.
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tickers: tickers.into_iter().map(Into::into).collect(),
            start: RangeStart::default(),
            end: RangeEnd::default(),
            interval: Interval::default(),
        }
    }

    pub fn with_start(mut self, start: RangeStart) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: RangeEnd) -> Self {
        self.end = end;
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Builds a request from textual input: `dd/mm/yyyy` dates and a
    /// case-insensitive frequency name.
    pub fn from_args<S: AsRef<str>>(
        tickers: &[S],
        start_date: Option<&str>,
        end_date: Option<&str>,
        frequency: &str,
    ) -> Result<Self, StockDashError> {
        let start = match start_date {
            Some(raw) => RangeStart::On(parse_date(raw)?),
            None => RangeStart::EarliestAvailable,
        };
        let end = match end_date {
            Some(raw) => RangeEnd::On(parse_date(raw)?),
            None => RangeEnd::Now,
        };
        Ok(Self {
            tickers: tickers.iter().map(|t| t.as_ref().to_string()).collect(),
            start,
            end,
            interval: parse_frequency(frequency)?,
        })
    }

    /// Checks the bounds against `now` and converts them to epoch seconds.
    ///
    /// An explicit end date covers that whole day.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<ResolvedRange, StockDashError> {
        let today = now.date_naive();
        let start = match self.start {
            RangeStart::EarliestAvailable => EARLIEST_AVAILABLE,
            RangeStart::On(date) => date,
        };
        let (end, period2) = match self.end {
            RangeEnd::Now => (today, now.timestamp()),
            RangeEnd::On(date) => (date, midnight_epoch(date) + SECONDS_PER_DAY),
        };

        if end < start {
            return Err(StockDashError::InvalidDateRange { start, end });
        }
        for date in [end, start] {
            if date > today {
                return Err(StockDashError::FutureDateRequested { date });
            }
        }

        Ok(ResolvedRange {
            start,
            end,
            period1: midnight_epoch(start),
            period2,
        })
    }
}

fn midnight_epoch(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Fetches and normalizes historical quotes, one request per ticker.
pub struct HistoricalDataFetcher {
    client: Client,
}

impl HistoricalDataFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches every ticker of `request` relative to the current instant.
    pub async fn fetch(&self, request: &HistoryRequest) -> Result<PriceTable, StockDashError> {
        self.fetch_at(request, Utc::now()).await
    }

    /// Same as [`fetch`](Self::fetch) with an explicit "now".
    ///
    /// Tickers are fetched sequentially in request order; the first failure
    /// aborts the batch.
    pub async fn fetch_at(
        &self,
        request: &HistoryRequest,
        now: DateTime<Utc>,
    ) -> Result<PriceTable, StockDashError> {
        let tickers = normalize_tickers(request.tickers.as_slice())?;
        let range = request.resolve(now)?;
        let query = HistoryQuery::new(range.period1, range.period2).with_interval(request.interval);
        let requested_start = match request.start {
            RangeStart::On(date) => Some(date),
            RangeStart::EarliestAvailable => None,
        };

        let mut series = Vec::with_capacity(tickers.len());
        for ticker in &tickers {
            let rows = self
                .fetch_ticker(ticker, &query, &range, requested_start)
                .await?;
            series.push(rows);
        }

        let table = PriceTable::from_series(series)?;
        tracing::debug!(
            "Fetched {} rows for {} ticker(s) at {} frequency",
            table.len(),
            tickers.len(),
            request.interval
        );
        Ok(table)
    }

    async fn fetch_ticker(
        &self,
        ticker: &str,
        query: &HistoryQuery,
        range: &ResolvedRange,
        requested_start: Option<NaiveDate>,
    ) -> Result<Vec<PriceRow>, StockDashError> {
        let body = self.client.get_history_csv(ticker, query).await?;
        let mut rows = parse_history_csv(ticker, &body)?;

        let before = rows.len();
        rows.retain(|r| r.date >= range.start && r.date <= range.end);
        if rows.len() != before {
            tracing::debug!(
                "Dropped {} {} rows outside {}..={}",
                before - rows.len(),
                ticker,
                range.start,
                range.end
            );
        }

        if let Some(first) = later_series_start(requested_start, &rows) {
            tracing::info!("{}: time series starts on {}", ticker, format_date(first));
        }
        Ok(rows)
    }
}

/// First row date when it falls after an explicitly requested start.
///
/// `None` for the default start, for an empty series, or when the data
/// covers the requested start.
fn later_series_start(
    requested_start: Option<NaiveDate>,
    rows: &[PriceRow],
) -> Option<NaiveDate> {
    let requested = requested_start?;
    let first = rows.first()?.date;
    (first > requested).then_some(first)
}

/// Column positions of the required headers.
struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    adj_close: usize,
    volume: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, StockDashError> {
        let find = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                StockDashError::Parse(format!(
                    "missing column '{}' (found: {})",
                    name,
                    headers.iter().collect::<Vec<_>>().join(", ")
                ))
            })
        };
        Ok(Self {
            date: find(REQUIRED_COLUMNS[0])?,
            open: find(REQUIRED_COLUMNS[1])?,
            high: find(REQUIRED_COLUMNS[2])?,
            low: find(REQUIRED_COLUMNS[3])?,
            close: find(REQUIRED_COLUMNS[4])?,
            adj_close: find(REQUIRED_COLUMNS[5])?,
            volume: find(REQUIRED_COLUMNS[6])?,
        })
    }
}

/// Parses a download body into rows for `ticker` (uppercased), oldest first.
///
/// Empty bodies, header-only bodies, missing columns, unparseable cells and
/// repeated dates are all `Parse` errors. `null` cells become `None`.
pub fn parse_history_csv(ticker: &str, body: &str) -> Result<Vec<PriceRow>, StockDashError> {
    if body.trim().is_empty() {
        return Err(StockDashError::Parse(format!(
            "empty response body for {}",
            ticker
        )));
    }

    let ticker = ticker.to_uppercase();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());
    let columns = Columns::locate(reader.headers()?)?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = idx + 2;
        let cell = |col: usize| record.get(col).unwrap_or("");

        let date = NaiveDate::parse_from_str(cell(columns.date), SOURCE_DATE_FORMAT).map_err(
            |_| {
                StockDashError::Parse(format!(
                    "line {}: invalid date '{}'",
                    line,
                    cell(columns.date)
                ))
            },
        )?;

        rows.push(PriceRow {
            ticker: ticker.clone(),
            date,
            open: parse_price(cell(columns.open), "Open", line)?,
            high: parse_price(cell(columns.high), "High", line)?,
            low: parse_price(cell(columns.low), "Low", line)?,
            close: parse_price(cell(columns.close), "Close", line)?,
            adj_close: parse_price(cell(columns.adj_close), "Adj Close", line)?,
            volume: parse_volume(cell(columns.volume), line)?,
        });
    }

    if rows.is_empty() {
        return Err(StockDashError::Parse(format!(
            "no price rows in response for {}",
            ticker
        )));
    }

    rows.sort_by_key(|r| r.date);
    if let Some(pair) = rows.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(StockDashError::Parse(format!(
            "duplicate date {} for {}",
            pair[0].date, ticker
        )));
    }

    Ok(rows)
}

fn parse_price(raw: &str, column: &str, line: usize) -> Result<Option<f64>, StockDashError> {
    if raw.is_empty() || raw.eq_ignore_ascii_case(MISSING_VALUE) {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(StockDashError::Parse(format!(
            "line {}: invalid {} value '{}'",
            line, column, raw
        ))),
    }
}

fn parse_volume(raw: &str, line: usize) -> Result<Option<u64>, StockDashError> {
    if raw.is_empty() || raw.eq_ignore_ascii_case(MISSING_VALUE) {
        return Ok(None);
    }
    raw.parse::<u64>().map(Some).map_err(|_| {
        StockDashError::Parse(format!("line {}: invalid Volume value '{}'", line, raw))
    })
}
