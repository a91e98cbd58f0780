use super::*;

// -- Date parsing --

#[test]
fn date_day_first() {
    assert_eq!(
        parse_date("31/01/2023").unwrap(),
        NaiveDate::from_ymd_opt(2023, 1, 31).unwrap()
    );
}

#[test]
fn date_single_digit_parts() {
    assert_eq!(
        parse_date("1/6/2023").unwrap(),
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    );
}

#[test]
fn date_trims_whitespace() {
    assert!(parse_date("  01/01/2023 ").is_ok());
}

#[test]
fn date_iso_rejected() {
    assert!(matches!(
        parse_date("2023-01-31"),
        Err(StockDashError::InvalidInput(_))
    ));
}

#[test]
fn date_month_first_rejected() {
    assert!(parse_date("01/31/2023").is_err());
}

#[test]
fn date_empty_rejected() {
    assert!(parse_date("").is_err());
}

#[test]
fn date_format_roundtrip() {
    let date = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
    assert_eq!(format_date(date), "29/02/2020");
    assert_eq!(parse_date(&format_date(date)).unwrap(), date);
}

// -- Ticker validation --

#[test]
fn ticker_uppercased() {
    assert_eq!(validate_ticker("aapl").unwrap(), "AAPL");
}

#[test]
fn ticker_trimmed() {
    assert_eq!(validate_ticker("  msft ").unwrap(), "MSFT");
}

#[test]
fn ticker_special_symbols() {
    assert_eq!(validate_ticker("brk.b").unwrap(), "BRK.B");
    assert_eq!(validate_ticker("^gspc").unwrap(), "^GSPC");
    assert_eq!(validate_ticker("eurusd=x").unwrap(), "EURUSD=X");
    assert_eq!(validate_ticker("bf-b").unwrap(), "BF-B");
}

#[test]
fn ticker_empty() {
    assert!(validate_ticker("   ").is_err());
}

#[test]
fn ticker_too_long() {
    assert!(validate_ticker(&"A".repeat(MAX_TICKER_LENGTH + 1)).is_err());
}

#[test]
fn ticker_path_characters_rejected() {
    assert!(validate_ticker("AAPL/../x").is_err());
    assert!(validate_ticker("AA PL").is_err());
    assert!(validate_ticker("AAPL?x=1").is_err());
}

// -- Ticker lists --

#[test]
fn tickers_keep_order() {
    let out = normalize_tickers(&["msft", "AAPL", "goog"]).unwrap();
    assert_eq!(out, vec!["MSFT", "AAPL", "GOOG"]);
}

#[test]
fn tickers_deduplicated_case_insensitively() {
    let out = normalize_tickers(&["aapl", "MSFT", "AAPL"]).unwrap();
    assert_eq!(out, vec!["AAPL", "MSFT"]);
}

#[test]
fn tickers_empty_list() {
    let empty: [&str; 0] = [];
    assert!(normalize_tickers(&empty).is_err());
}

#[test]
fn tickers_one_bad_fails_all() {
    assert!(normalize_tickers(&["AAPL", ""]).is_err());
}

// -- Frequency --

#[test]
fn frequency_case_insensitive() {
    assert_eq!(parse_frequency("Daily").unwrap(), Interval::Daily);
    assert_eq!(parse_frequency("weekly").unwrap(), Interval::Weekly);
    assert_eq!(parse_frequency("MONTHLY").unwrap(), Interval::Monthly);
}

#[test]
fn frequency_unknown() {
    match parse_frequency("hourly") {
        Err(StockDashError::UnknownFrequency(f)) => assert_eq!(f, "hourly"),
        other => panic!("expected UnknownFrequency, got {:?}", other),
    }
}

#[test]
fn frequency_interval_codes() {
    assert_eq!(parse_frequency("daily").unwrap().code(), "1d");
    assert_eq!(parse_frequency("weekly").unwrap().code(), "1w");
    assert_eq!(parse_frequency("monthly").unwrap().code(), "1m");
}
