//! Error types shared between the stock server and its host client.
//!
//! `StockError` unifies I/O, serialization, request validation and provider
//! failures. Its `Display` text is exactly what the server places in the
//! `error` field of a response, so the validation variants carry the literal
//! messages hosts match on.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by server and client.
#[derive(Error, Debug)]
pub enum StockError {
    /// I/O error on the protocol streams or while spawning the server.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The request named a function the server does not expose.
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// The `ticker` argument was absent, empty, or not a string.
    #[error("Ticker symbol is required")]
    MissingTicker,

    /// A request or argument had the wrong JSON shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The market-data provider reported a failure (unknown symbol, API error, bad payload).
    #[error("{0}")]
    Provider(String),

    /// Transport failure talking to the market-data provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A poisoned mutex was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// The peer broke the line protocol (closed early or sent an unexpected line).
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl<T> From<PoisonError<T>> for StockError {
    fn from(err: PoisonError<T>) -> Self {
        StockError::MutexLock(err.to_string())
    }
}
