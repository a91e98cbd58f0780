//! HTTP client for the historical quotes download and company profile pages.

use std::time::Duration;

use url::Url;

use crate::{
    query::{HistoryQuery, ProfileQuery, Query},
    user_agent::get_user_agent,
    Error,
};

/// Default host of the CSV download endpoint.
pub const DEFAULT_HISTORY_URL: &str = "https://query1.finance.yahoo.com";
/// Default host of the HTML quote pages.
pub const DEFAULT_PROFILE_URL: &str = "https://finance.yahoo.com";
/// Request timeout used when the caller does not supply its own client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the quotes download and profile endpoints.
///
/// Owns a single `reqwest::Client`. TLS settings live on that instance only;
/// callers that need a custom transport build one with
/// [`Client::build_http_client`] or their own builder and pass it to
/// [`Client::with_http_client`].
#[derive(Clone)]
pub struct Client {
    /// Base URL for CSV downloads. Defaults to `https://query1.finance.yahoo.com`.
    history_base_url: String,
    /// Base URL for quote/profile pages. Defaults to `https://finance.yahoo.com`.
    profile_base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client pointing at the production endpoints.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_urls(DEFAULT_HISTORY_URL, DEFAULT_PROFILE_URL)
    }

    /// Creates a client that sends both kinds of request to one host.
    /// Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_base_urls(base_url, base_url)
    }

    /// Creates a client with separate download and profile hosts.
    pub fn with_base_urls(history_base_url: &str, profile_base_url: &str) -> Result<Self, Error> {
        let http = Self::build_http_client(DEFAULT_TIMEOUT, false)?;
        Ok(Self::with_http_client(
            http,
            history_base_url,
            profile_base_url,
        ))
    }

    /// Wraps an explicitly constructed `reqwest::Client`.
    pub fn with_http_client(
        http: reqwest::Client,
        history_base_url: &str,
        profile_base_url: &str,
    ) -> Self {
        Self {
            history_base_url: history_base_url.trim_end_matches('/').to_string(),
            profile_base_url: profile_base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Builds the transport used by [`Client::new`].
    ///
    /// `accept_invalid_certs` disables certificate verification for the
    /// returned instance only.
    pub fn build_http_client(
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<reqwest::Client, Error> {
        if accept_invalid_certs {
            tracing::warn!("TLS certificate verification disabled for the quotes client");
        }
        reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })
    }

    fn get_url(
        &self,
        base: &str,
        segments: &[&str],
        query: Option<&impl Query>,
    ) -> Result<Url, Error> {
        let mut url = Url::parse(base).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", base);
                Error::RequestFailed
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    /// URL of the CSV download for `ticker` (uppercased).
    pub fn history_url(&self, ticker: &str, query: &HistoryQuery) -> Result<Url, Error> {
        let ticker = ticker.to_uppercase();
        self.get_url(
            &self.history_base_url,
            &["v7", "finance", "download", ticker.as_str()],
            Some(query),
        )
    }

    /// URL of the company profile page for `ticker` (uppercased).
    pub fn profile_url(&self, ticker: &str) -> Result<Url, Error> {
        let query = ProfileQuery::new(ticker);
        self.get_url(
            &self.profile_base_url,
            &["quote", query.ticker.as_str(), "profile"],
            Some(&query),
        )
    }

    async fn get_text(&self, url: Url, accept: &str) -> Result<String, Error> {
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header("accept", accept)
            .header("accept-language", "en-US,en;q=0.9")
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    /// Downloads the raw CSV price history for one ticker.
    pub async fn get_history_csv(
        &self,
        ticker: &str,
        query: &HistoryQuery,
    ) -> Result<String, Error> {
        let url = self.history_url(ticker, query)?;
        self.get_text(url, "text/csv,text/plain,*/*").await
    }

    /// Downloads the company profile page HTML for one ticker.
    pub async fn get_profile_html(&self, ticker: &str) -> Result<String, Error> {
        let url = self.profile_url(ticker)?;
        self.get_text(url, "text/html,application/xhtml+xml").await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_body_unchanged() {
        assert_eq!(truncate_body("Not Found"), "Not Found");
    }

    #[test]
    fn truncate_long_body() {
        let body = "x".repeat(5000);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(out.len(), 2000 + "...[truncated]".len());
    }

    #[test]
    fn truncate_respects_char_boundary() {
        let body = format!("{}é{}", "a".repeat(1999), "b".repeat(100));
        let out = truncate_body(&body);
        assert!(out.starts_with(&"a".repeat(1999)));
        assert!(!out.contains('é'));
    }

    #[test]
    fn history_url_layout() {
        let client = Client::with_base_url("https://example.com/").unwrap();
        let url = client
            .history_url("aapl", &HistoryQuery::new(100, 200))
            .unwrap();
        assert_eq!(url.path(), "/v7/finance/download/AAPL");
        assert_eq!(
            url.query(),
            Some("period1=100&period2=200&interval=1d&events=history")
        );
    }

    #[test]
    fn profile_url_layout() {
        let client = Client::with_base_url("https://example.com").unwrap();
        let url = client.profile_url("msft").unwrap();
        assert_eq!(url.path(), "/quote/MSFT/profile");
        assert_eq!(url.query(), Some("p=MSFT"));
    }

    #[test]
    fn invalid_base_url_fails() {
        let client = Client::with_base_url("not a url").unwrap();
        assert!(matches!(
            client.profile_url("AAPL"),
            Err(Error::RequestFailed)
        ));
    }
}
