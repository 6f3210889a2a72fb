//! Output records returned in the `result` field of a response.
//!
//! Each record has a fixed set of fields; the server never adds or omits one.
//! Quote numbers are kept as `serde_json::Number` so whatever precision the
//! provider reported (integer volume, float price) reaches the host unchanged.
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Point-in-time quote for a single ticker.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Ticker exactly as requested.
    pub symbol: String,
    /// Short company name, empty when unknown.
    pub name: String,
    pub price: Number,
    pub previous_close: Number,
    pub open: Number,
    pub day_high: Number,
    pub day_low: Number,
    pub volume: Number,
    pub market_cap: Number,
    pub pe_ratio: Number,
    pub dividend_yield: Number,
}

/// One daily OHLCV bar.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBar {
    /// Exchange-local trading date, `YYYY-MM-DD`.
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A single analyst rating change.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    /// Date of the rating change, `YYYY-MM-DD`.
    pub date: String,
    pub firm: String,
    pub to_grade: String,
    pub from_grade: String,
    pub action: String,
}
