use url::Url;

use super::Query;

/// Query string for the company profile page (`?p=TICKER`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileQuery {
    pub ticker: String,
}

impl ProfileQuery {
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_uppercase(),
        }
    }
}

impl Query for ProfileQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("p", &self.ticker);
        url
    }
}
