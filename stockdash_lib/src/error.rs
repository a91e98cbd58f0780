//! Error types for the library layer.

use std::fmt;

use chrono::NaiveDate;

use crate::validation::format_date;

/// Errors produced by the library layer, wrapping upstream client errors
/// and adding date-range, frequency, parsing and input validation failures.
#[derive(Debug)]
pub enum StockDashError {
    /// The requested end date precedes the start date.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    /// A requested start or end date lies after today.
    FutureDateRequested { date: NaiveDate },
    /// The frequency is not one of daily, weekly or monthly.
    UnknownFrequency(String),
    /// The remote endpoint returned a non-success status or could not be reached.
    RemoteFetch(yahoo_quotes_api::Error),
    /// The response body did not have the expected shape.
    Parse(String),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// A configuration value could not be used.
    Config(String),
}

impl fmt::Display for StockDashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDateRange { start, end } => write!(
                f,
                "End date must be after the start date (start {}, end {})",
                format_date(*start),
                format_date(*end)
            ),
            Self::FutureDateRequested { date } => write!(
                f,
                "Start/End dates cannot be future dates ({})",
                format_date(*date)
            ),
            Self::UnknownFrequency(freq) => write!(
                f,
                "Unknown frequency '{}': expected daily, weekly or monthly",
                freq
            ),
            Self::RemoteFetch(e) => write!(f, "Remote fetch error: {}", e),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for StockDashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RemoteFetch(e) => Some(e),
            _ => None,
        }
    }
}

impl From<yahoo_quotes_api::Error> for StockDashError {
    fn from(e: yahoo_quotes_api::Error) -> Self {
        Self::RemoteFetch(e)
    }
}

impl From<yahoo_quotes_api::types::ParseIntervalError> for StockDashError {
    fn from(e: yahoo_quotes_api::types::ParseIntervalError) -> Self {
        Self::UnknownFrequency(e.0)
    }
}

impl From<csv::Error> for StockDashError {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn display_invalid_range_uses_day_first_dates() {
        let err = StockDashError::InvalidDateRange {
            start: date(2023, 6, 1),
            end: date(2023, 1, 1),
        };
        let msg = err.to_string();
        assert!(msg.contains("01/06/2023"));
        assert!(msg.contains("01/01/2023"));
    }

    #[test]
    fn display_future_date() {
        let err = StockDashError::FutureDateRequested {
            date: date(2999, 12, 31),
        };
        assert!(err.to_string().contains("31/12/2999"));
    }

    #[test]
    fn interval_error_becomes_unknown_frequency() {
        let err: StockDashError =
            yahoo_quotes_api::types::ParseIntervalError("hourly".to_string()).into();
        assert!(matches!(err, StockDashError::UnknownFrequency(ref f) if f == "hourly"));
    }

    #[test]
    fn remote_fetch_has_source() {
        use std::error::Error as _;
        let err: StockDashError = yahoo_quotes_api::Error::HttpStatus {
            status: 404,
            body: String::new(),
        }
        .into();
        assert!(err.source().is_some());
        assert!(err.to_string().contains("404"));
    }
}
