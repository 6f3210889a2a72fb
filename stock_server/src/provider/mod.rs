//! Market-data provider seam.
//!
//! The server never talks to the network directly: it asks a
//! `MarketDataProvider` for raw records and shapes them itself. Production uses
//! [`yahoo::YahooProvider`]; tests substitute fixtures or mocks.
//!
//! Raw records deliberately keep the provider's own vocabulary (Yahoo key names,
//! timezone-aware timestamps) so that defaulting and formatting stay in
//! `shape`, where the output schema is fixed.

pub mod yahoo;

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use stock_common::Result;

/// Provider info mapping for a ticker, keyed by provider field names
/// (`shortName`, `currentPrice`, `trailingPE`, ...).
pub type RawQuote = Map<String, Value>;

/// One row of a provider price history, indexed by its timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    /// Bar timestamp in the exchange's local offset.
    pub timestamp: DateTime<FixedOffset>,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Shares traded; 0 when the provider reported none.
    pub volume: u64,
}

/// One row of a provider recommendations table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRow {
    /// When the rating changed.
    pub timestamp: DateTime<FixedOffset>,
    /// Columns `Firm`, `To Grade`, `From Grade`, `Action`; any may be missing.
    pub fields: Map<String, Value>,
}

/// Source of quote, history and recommendation data for a ticker.
///
/// Every call is blocking and may fail for an unknown ticker, a network
/// failure, or a malformed provider payload. Callers turn failures into error
/// responses; implementations must not retry on their own.
#[cfg_attr(test, mockall::automock)]
pub trait MarketDataProvider {
    /// Fetch the info mapping for `ticker`.
    fn fetch_quote(&self, ticker: &str) -> Result<RawQuote>;

    /// Fetch daily rows for `ticker` over `period`, oldest first.
    /// `period` is forwarded unvalidated.
    fn fetch_history(&self, ticker: &str, period: &str) -> Result<Vec<PriceRow>>;

    /// Fetch the recommendations table for `ticker`; `None` when the provider has none.
    fn fetch_recommendations(&self, ticker: &str) -> Result<Option<Vec<RecommendationRow>>>;
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for &P {
    fn fetch_quote(&self, ticker: &str) -> Result<RawQuote> {
        (**self).fetch_quote(ticker)
    }

    fn fetch_history(&self, ticker: &str, period: &str) -> Result<Vec<PriceRow>> {
        (**self).fetch_history(ticker, period)
    }

    fn fetch_recommendations(&self, ticker: &str) -> Result<Option<Vec<RecommendationRow>>> {
        (**self).fetch_recommendations(ticker)
    }
}
