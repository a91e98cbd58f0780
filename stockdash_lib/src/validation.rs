use chrono::NaiveDate;
use yahoo_quotes_api::types::Interval;

use crate::error::StockDashError;

/// Textual date format accepted on input and used in messages (`dd/mm/yyyy`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const MAX_TICKER_LENGTH: usize = 20;

/// Parse a `dd/mm/yyyy` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, StockDashError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        StockDashError::InvalidInput(format!(
            "invalid date '{}', expected dd/mm/yyyy (e.g. 31/01/2023)",
            input
        ))
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Validate a ticker symbol: trim, uppercase, enforce length and charset.
///
/// Letters, digits and `.`, `-`, `^`, `=` are accepted so that share
/// classes (`BRK.B`), indices (`^GSPC`) and currency pairs (`EURUSD=X`)
/// pass through.
pub fn validate_ticker(input: &str) -> Result<String, StockDashError> {
    let upper = input.trim().to_uppercase();
    if upper.is_empty() {
        return Err(StockDashError::InvalidInput(
            "ticker symbol is empty".to_string(),
        ));
    }
    if upper.len() > MAX_TICKER_LENGTH {
        return Err(StockDashError::InvalidInput(format!(
            "ticker '{}' exceeds maximum length of {} characters",
            input.trim(),
            MAX_TICKER_LENGTH
        )));
    }
    if !upper
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
    {
        return Err(StockDashError::InvalidInput(format!(
            "ticker '{}' contains unsupported characters",
            input.trim()
        )));
    }
    Ok(upper)
}

/// Validate and uppercase every ticker, dropping repeats while keeping request order.
pub fn normalize_tickers<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<String>, StockDashError> {
    if inputs.is_empty() {
        return Err(StockDashError::InvalidInput(
            "at least one ticker is required".to_string(),
        ));
    }
    let mut out: Vec<String> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let ticker = validate_ticker(input.as_ref())?;
        if !out.contains(&ticker) {
            out.push(ticker);
        }
    }
    Ok(out)
}

/// Map a case-insensitive frequency name to its interval.
pub fn parse_frequency(input: &str) -> Result<Interval, StockDashError> {
    Ok(input.parse::<Interval>()?)
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
