//! Static capability description sent once at startup.

use std::sync::LazyLock;

use serde_json::{Value, json};
use stock_common::protocol::{FunctionDescriptor, Manifest};
use stock_common::{Function, Period};
use strum::IntoEnumIterator;

use crate::dispatcher::DEFAULT_PERIOD;

const TICKER_DESCRIPTION: &str = "The stock ticker symbol (e.g., AAPL, MSFT)";

static MANIFEST: LazyLock<Manifest> = LazyLock::new(|| Manifest {
    functions: Function::iter()
        .map(|function| FunctionDescriptor {
            name: function.to_string(),
            description: function.description().to_string(),
            parameters: parameters(function),
        })
        .collect(),
});

/// The server manifest; built on first use and identical for the process lifetime.
pub fn server_manifest() -> &'static Manifest {
    &MANIFEST
}

fn parameters(function: Function) -> Value {
    let ticker = json!({"type": "string", "description": TICKER_DESCRIPTION});
    let properties = match function {
        Function::GetHistoricalData => {
            let periods: Vec<String> = Period::iter().map(|p| p.to_string()).collect();
            json!({
                "ticker": ticker,
                "period": {
                    "type": "string",
                    "description": format!("Time period to fetch data for ({})", periods.join(", ")),
                    "default": DEFAULT_PERIOD,
                }
            })
        }
        Function::GetStockInfo | Function::GetRecommendations => json!({"ticker": ticker}),
    };
    json!({"type": "object", "properties": properties, "required": ["ticker"]})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_is_stable() {
        assert!(std::ptr::eq(server_manifest(), server_manifest()));
        assert_eq!(
            serde_json::to_string(server_manifest()).unwrap(),
            serde_json::to_string(server_manifest()).unwrap()
        );
    }

    #[test]
    fn lists_three_functions_in_order() {
        let names: Vec<&str> = server_manifest()
            .functions
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["get_stock_info", "get_historical_data", "get_recommendations"]);
    }

    #[test]
    fn historical_schema_documents_period() {
        let history = &server_manifest().functions[1];
        assert_eq!(history.description, "Get historical price data for a stock ticker");
        assert_eq!(
            history.parameters,
            json!({
                "type": "object",
                "properties": {
                    "ticker": {"type": "string", "description": "The stock ticker symbol (e.g., AAPL, MSFT)"},
                    "period": {
                        "type": "string",
                        "description": "Time period to fetch data for (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)",
                        "default": "1mo"
                    }
                },
                "required": ["ticker"]
            })
        );
    }

    #[test]
    fn ticker_is_required_everywhere() {
        for function in &server_manifest().functions {
            assert_eq!(function.parameters["required"], json!(["ticker"]));
        }
    }
}
