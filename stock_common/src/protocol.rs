//! Wire types for the line-delimited JSON protocol.
//!
//! On startup the server writes one `Manifest` line. Every later input line is
//! a `Request` and produces exactly one `Response` line, in input order.
use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StockError;
use crate::function::Function;

/// A call to one of the server's functions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Wire name of the function, e.g. `get_stock_info`.
    pub function: String,
    /// Named arguments; `ticker` is always required, `period` is optional.
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl Request {
    /// Build a request for `function` with a single `ticker` argument.
    pub fn new(function: Function, ticker: &str) -> Self {
        let mut arguments = Map::new();
        arguments.insert("ticker".to_string(), Value::from(ticker));
        Request {
            function: function.to_string(),
            arguments,
        }
    }

    /// Add or replace an argument.
    pub fn with_argument(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.to_string(), value.into());
        self
    }
}

/// Outcome of one request: `{"result": ...}` or `{"error": "..."}`, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response<T = Value> {
    /// Successful payload.
    Result(T),
    /// Human-readable failure message.
    Error(String),
}

impl<T> Response<T> {
    /// Convert into a standard `Result`, turning an error line into `StockError::Provider`.
    pub fn into_result(self) -> Result<T, StockError> {
        match self {
            Response::Result(payload) => Ok(payload),
            Response::Error(message) => Err(StockError::Provider(message)),
        }
    }
}

impl<T> From<Result<T, StockError>> for Response<T> {
    fn from(outcome: Result<T, StockError>) -> Self {
        match outcome {
            Ok(payload) => Response::Result(payload),
            Err(e) => Response::Error(e.to_string()),
        }
    }
}

/// Static self-description of the server, sent once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// All callable functions.
    pub functions: Vec<FunctionDescriptor>,
}

/// Name, description and JSON-schema parameters of one function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Wire name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON-schema object describing the `arguments` mapping.
    pub parameters: Value,
}

/// Write `value` as one JSON line and flush it so the peer sees it immediately.
pub fn write_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<(), StockError> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
