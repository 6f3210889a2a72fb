//! Request dispatcher: validate -> invoke -> format.
//!
//! `validate` turns a decoded JSON request into a typed [`Call`] (unknown
//! names and missing tickers fail here, before the provider is touched).
//! `invoke` fetches from the provider and runs the matching shaper. `format`
//! wraps the outcome as a [`Response`]; provider failures become error
//! responses carrying the failure text.

use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use stock_common::protocol::Response;
use stock_common::records::{HistoricalBar, QuoteSnapshot, RecommendationEntry};
use stock_common::{Function, Result, StockError};

use crate::provider::MarketDataProvider;
use crate::shape::{shape_history, shape_quote, shape_recommendations};

/// Period used when `get_historical_data` omits one.
pub const DEFAULT_PERIOD: &str = "1mo";

/// Successful result of one call; serialised as the bare record or list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// `get_stock_info` result.
    Quote(QuoteSnapshot),
    /// `get_historical_data` result, oldest bar first.
    History(Vec<HistoricalBar>),
    /// `get_recommendations` result, possibly empty.
    Recommendations(Vec<RecommendationEntry>),
}

/// A validated request.
#[derive(Debug, Clone, PartialEq)]
enum Call<'a> {
    StockInfo { ticker: &'a str },
    HistoricalData { ticker: &'a str, period: &'a str },
    Recommendations { ticker: &'a str },
}

/// Routes requests to the provider and shapers.
pub struct Dispatcher<P> {
    provider: P,
}

impl<P: MarketDataProvider> Dispatcher<P> {
    /// Dispatch requests against `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Handle one decoded request; never fails, errors become `{"error": ...}`.
    pub fn handle(&self, request: &Value) -> Response<Payload> {
        let outcome = self.dispatch(request);
        if let Err(e) = &outcome {
            warn!("Request failed: {}", e);
        }
        outcome.into()
    }

    /// Validate and invoke one request.
    pub fn dispatch(&self, request: &Value) -> Result<Payload> {
        let call = validate(request)?;
        debug!("Dispatching {:?}", call);
        self.invoke(call)
    }

    fn invoke(&self, call: Call<'_>) -> Result<Payload> {
        let payload = match call {
            Call::StockInfo { ticker } => {
                let raw = self.provider.fetch_quote(ticker)?;
                Payload::Quote(shape_quote(ticker, &raw))
            }
            Call::HistoricalData { ticker, period } => {
                let rows = self.provider.fetch_history(ticker, period)?;
                Payload::History(shape_history(&rows))
            }
            Call::Recommendations { ticker } => {
                let rows = self.provider.fetch_recommendations(ticker)?;
                Payload::Recommendations(shape_recommendations(rows.as_deref()))
            }
        };
        Ok(payload)
    }
}

fn validate(request: &Value) -> Result<Call<'_>> {
    let request = request
        .as_object()
        .ok_or_else(|| StockError::InvalidArgument("request must be a JSON object".to_string()))?;

    let name = match request.get("function") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    };
    let function = Function::lookup(&name)?;

    let arguments = arguments(request)?;
    let ticker = arguments
        .and_then(|args| args.get("ticker"))
        .and_then(Value::as_str)
        .filter(|ticker| !ticker.is_empty())
        .ok_or(StockError::MissingTicker)?;

    Ok(match function {
        Function::GetStockInfo => Call::StockInfo { ticker },
        Function::GetHistoricalData => {
            let period = match arguments.and_then(|args| args.get("period")) {
                None | Some(Value::Null) => DEFAULT_PERIOD,
                Some(Value::String(period)) => period.as_str(),
                Some(_) => {
                    return Err(StockError::InvalidArgument(
                        "period must be a string".to_string(),
                    ));
                }
            };
            Call::HistoricalData { ticker, period }
        }
        Function::GetRecommendations => Call::Recommendations { ticker },
    })
}

fn arguments(request: &Map<String, Value>) -> Result<Option<&Map<String, Value>>> {
    match request.get("arguments") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(args)) => Ok(Some(args)),
        Some(_) => Err(StockError::InvalidArgument(
            "arguments must be a JSON object".to_string(),
        )),
    }
}
