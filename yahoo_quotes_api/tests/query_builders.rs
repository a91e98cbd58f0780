use yahoo_quotes_api::types::{Interval, ParseIntervalError};
use yahoo_quotes_api::{HistoryQuery, ProfileQuery, Query};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/v7/finance/download/AAPL").unwrap()
}

#[test]
fn history_query_defaults_to_daily() {
    let url = HistoryQuery::new(1, 2).add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("period1=1"));
    assert!(query.contains("period2=2"));
    assert!(query.contains("interval=1d"));
    assert!(query.contains("events=history"));
}

#[test]
fn history_query_interval_codes() {
    let url = HistoryQuery::new(1, 2)
        .with_interval(Interval::Weekly)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("interval=1w"));

    let url = HistoryQuery::new(1, 2)
        .with_interval(Interval::Monthly)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("interval=1m"));
}

#[test]
fn history_query_negative_period() {
    let url = HistoryQuery::new(-30_610_224_000, 0).add_to_url(&base_url());
    assert!(url.query().unwrap().contains("period1=-30610224000"));
}

#[test]
fn history_query_preserves_path() {
    let url = HistoryQuery::new(1, 2).add_to_url(&base_url());
    assert_eq!(url.path(), "/v7/finance/download/AAPL");
}

#[test]
fn profile_query_uppercases() {
    let url = ProfileQuery::new("brk.b").add_to_url(&Url::parse("https://example.com").unwrap());
    assert_eq!(url.query(), Some("p=BRK.B"));
}

#[test]
fn interval_parse_case_insensitive() {
    assert_eq!("Daily".parse::<Interval>().unwrap(), Interval::Daily);
    assert_eq!("WEEKLY".parse::<Interval>().unwrap(), Interval::Weekly);
    assert_eq!(" monthly ".parse::<Interval>().unwrap(), Interval::Monthly);
}

#[test]
fn interval_parse_unknown() {
    let err = "hourly".parse::<Interval>().unwrap_err();
    assert_eq!(err, ParseIntervalError("hourly".to_string()));
    assert!(err.to_string().contains("hourly"));
}

#[test]
fn interval_display_roundtrips_name() {
    for interval in Interval::ALL {
        assert_eq!(interval.to_string().parse::<Interval>().unwrap(), interval);
    }
}
