use url::Url;

use crate::types::Interval;

use super::Query;

/// Event type requested from the download endpoint. Only price history is used.
const HISTORY_EVENTS: &str = "history";

/// Query parameters for the historical quotes download.
///
/// `period1` and `period2` are epoch seconds; the endpoint returns bars whose
/// session starts in `[period1, period2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryQuery {
    pub period1: i64,
    pub period2: i64,
    pub interval: Interval,
}

impl HistoryQuery {
    pub fn new(period1: i64, period2: i64) -> Self {
        Self {
            period1,
            period2,
            interval: Interval::default(),
        }
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }
}

impl Query for HistoryQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("period1", &self.period1.to_string())
            .append_pair("period2", &self.period2.to_string())
            .append_pair("interval", self.interval.code())
            .append_pair("events", HISTORY_EVENTS);
        url
    }
}
