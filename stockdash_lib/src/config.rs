//! Runtime settings read from the environment.

use std::time::Duration;

use yahoo_quotes_api::client::{DEFAULT_HISTORY_URL, DEFAULT_PROFILE_URL, DEFAULT_TIMEOUT};
use yahoo_quotes_api::Client;

use crate::error::StockDashError;

pub const HISTORY_URL_VAR: &str = "STOCKDASH_HISTORY_URL";
pub const PROFILE_URL_VAR: &str = "STOCKDASH_PROFILE_URL";
pub const TIMEOUT_VAR: &str = "STOCKDASH_HTTP_TIMEOUT_SECS";
pub const ACCEPT_INVALID_CERTS_VAR: &str = "STOCKDASH_ACCEPT_INVALID_CERTS";

/// Endpoints and transport options for the quotes client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub history_url: String,
    pub profile_url: String,
    pub timeout: Duration,
    /// Skip certificate verification on this client only.
    pub accept_invalid_certs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_url: DEFAULT_HISTORY_URL.to_string(),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }
}

impl Settings {
    /// Reads the `STOCKDASH_*` variables, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let timeout_secs = env_u64(&lookup, TIMEOUT_VAR, defaults.timeout.as_secs());
        Self {
            history_url: env_string(&lookup, HISTORY_URL_VAR, &defaults.history_url),
            profile_url: env_string(&lookup, PROFILE_URL_VAR, &defaults.profile_url),
            timeout: Duration::from_secs(timeout_secs),
            accept_invalid_certs: env_bool(
                &lookup,
                ACCEPT_INVALID_CERTS_VAR,
                defaults.accept_invalid_certs,
            ),
        }
    }

    pub fn with_history_url(mut self, url: &str) -> Self {
        self.history_url = url.to_string();
        self
    }

    pub fn with_profile_url(mut self, url: &str) -> Self {
        self.profile_url = url.to_string();
        self
    }

    /// Builds a quotes client from these settings.
    pub fn build_client(&self) -> Result<Client, StockDashError> {
        if self.timeout.is_zero() {
            return Err(StockDashError::Config(format!(
                "{} must be greater than zero",
                TIMEOUT_VAR
            )));
        }
        for (name, url) in [
            (HISTORY_URL_VAR, &self.history_url),
            (PROFILE_URL_VAR, &self.profile_url),
        ] {
            url::Url::parse(url).map_err(|e| {
                StockDashError::Config(format!("{} is not a valid URL ({}): {}", name, url, e))
            })?;
        }
        tracing::debug!(
            "quotes client: history={} profile={} timeout={}s",
            self.history_url,
            self.profile_url,
            self.timeout.as_secs()
        );
        let http = Client::build_http_client(self.timeout, self.accept_invalid_certs)?;
        Ok(Client::with_http_client(
            http,
            &self.history_url,
            &self.profile_url,
        ))
    }
}

fn env_string(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    lookup(key)
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key).map(|val| val.trim().to_lowercase()).as_deref() {
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
