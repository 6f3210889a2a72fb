//! Line-delimited JSON server exposing stock quote, history and analyst
//! recommendation lookups.
//!
//! Building blocks, leaves first:
//! - `provider`: the `MarketDataProvider` seam and its Yahoo Finance implementation.
//! - `shape`: pure transforms from raw provider records to fixed-shape output records.
//! - `dispatcher`: maps a request to a function, validates arguments, invokes and wraps.
//! - `manifest`: the static capability description sent at startup.
//! - `server`: the stdin/stdout line protocol loop.
//! - `args` / `net`: command-line configuration and provider defaults.
#![warn(missing_docs)]
pub mod args;
pub mod dispatcher;
pub mod manifest;
pub mod net;
pub mod provider;
pub mod server;
pub mod shape;

pub use dispatcher::{Dispatcher, Payload};
pub use server::serve;
