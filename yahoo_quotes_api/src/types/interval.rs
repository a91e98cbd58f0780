//! Sampling frequency of a historical quote series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bar size requested from the download endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// One bar per trading day. This is the default.
    #[default]
    Daily,
    /// One bar per week.
    Weekly,
    /// One bar per month.
    Monthly,
}

impl Interval {
    /// All supported intervals, in lookup-table order.
    pub const ALL: [Interval; 3] = [Interval::Daily, Interval::Weekly, Interval::Monthly];

    /// The `interval` query value understood by the endpoint.
    pub fn code(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1w",
            Interval::Monthly => "1m",
        }
    }

    /// The human-facing frequency name.
    pub fn name(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a frequency name is not in the lookup table.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown frequency '{0}' (expected daily, weekly or monthly)")]
pub struct ParseIntervalError(pub String);

impl FromStr for Interval {
    type Err = ParseIntervalError;

    /// Case-insensitive lookup of `daily`, `weekly` or `monthly`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Interval::Daily),
            "weekly" => Ok(Interval::Weekly),
            "monthly" => Ok(Interval::Monthly),
            _ => Err(ParseIntervalError(s.to_string())),
        }
    }
}
