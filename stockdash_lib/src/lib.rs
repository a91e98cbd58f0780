//! Library layer for stockdash: historical quote retrieval, company profiles,
//! and chart rendering.
//!
//! Wraps the `yahoo_quotes_api` crate with input validation, date-range
//! resolution, CSV normalization into a [`PriceTable`], profile scraping and
//! Plotly figure builders.

pub mod chart;
pub mod config;
pub mod error;
pub mod history;
pub mod scrape;
pub mod table;
pub mod validation;

pub use yahoo_quotes_api;
pub use yahoo_quotes_api::types::Interval;

pub use config::Settings;
pub use error::StockDashError;
pub use history::{
    HistoricalDataFetcher, HistoryRequest, RangeEnd, RangeStart, ResolvedRange,
    EARLIEST_AVAILABLE,
};
pub use scrape::{CompanyProfile, ScrapeClient, ScrapeError};
pub use table::{PriceField, PriceRow, PriceTable};
