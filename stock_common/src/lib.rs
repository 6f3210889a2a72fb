//!
//! Common types shared by the stock data server and its host client.
//!
//! This crate aggregates:
//! - `error`: unified error type `StockError` used across the workspace.
//! - `result`: handy `Result<T, StockError>` alias.
//! - `function`: names of the callable functions.
//! - `period`: history periods understood by the provider.
//! - `records`: fixed-shape output records.
//! - `protocol`: request, response and manifest wire types.
#![warn(missing_docs)]
pub mod error;
pub mod function;
pub mod period;
pub mod protocol;
pub mod records;
pub mod result;

pub use error::StockError;
pub use function::Function;
pub use period::Period;
pub use result::Result;
