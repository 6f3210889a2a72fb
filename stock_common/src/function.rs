//! Names of the functions the server exposes.

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::StockError;

/// Callable function, keyed by its wire name.
#[derive(Debug, Clone, Copy, Display, EnumString, EnumIter, Hash, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum Function {
    /// Quote snapshot for a ticker.
    GetStockInfo,
    /// Daily price bars for a ticker over a period.
    GetHistoricalData,
    /// Analyst upgrades and downgrades for a ticker.
    GetRecommendations,
}

impl Function {
    /// Resolve a wire name, failing with `UnknownFunction` on a miss.
    pub fn lookup(name: &str) -> Result<Self, StockError> {
        name.parse::<Function>()
            .map_err(|_| StockError::UnknownFunction(name.to_string()))
    }

    /// Human-readable description published in the manifest.
    pub fn description(&self) -> &'static str {
        match self {
            Function::GetStockInfo => "Get basic information about a stock ticker",
            Function::GetHistoricalData => "Get historical price data for a stock ticker",
            Function::GetRecommendations => "Get analyst recommendations for a stock ticker",
        }
    }
}
