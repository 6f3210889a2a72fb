//! Command-line arguments for the stock client.
//!
//! The client spawns the server executable, performs one call and prints the
//! result. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stock_common::protocol::Request;
use stock_common::{Function, Period};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the `stock_server` executable to spawn.
    #[clap(long, default_value = "stock_server")]
    pub server: PathBuf,

    /// Print the raw JSON result instead of formatted lines.
    #[clap(long)]
    pub json: bool,

    /// What to ask the server for.
    #[command(subcommand)]
    pub call: Call,
}

/// One call against the server.
#[derive(Debug, Clone, Subcommand)]
pub enum Call {
    /// Print the server's manifest.
    Manifest,
    /// Quote snapshot for a ticker.
    Info {
        /// Ticker symbol, e.g. AAPL.
        #[clap(long)]
        ticker: String,
    },
    /// Daily price history for a ticker.
    History {
        /// Ticker symbol, e.g. AAPL.
        #[clap(long)]
        ticker: String,
        /// Time range to fetch.
        #[clap(long, value_enum, default_value_t = Period::default())]
        period: Period,
    },
    /// Analyst upgrades and downgrades for a ticker.
    Recommendations {
        /// Ticker symbol, e.g. AAPL.
        #[clap(long)]
        ticker: String,
    },
}

impl Call {
    /// The protocol request for this call; `None` for `manifest`, which needs no request.
    pub fn to_request(&self) -> Option<Request> {
        match self {
            Call::Manifest => None,
            Call::Info { ticker } => Some(Request::new(Function::GetStockInfo, ticker)),
            Call::History { ticker, period } => Some(
                Request::new(Function::GetHistoricalData, ticker)
                    .with_argument("period", period.to_string()),
            ),
            Call::Recommendations { ticker } => {
                Some(Request::new(Function::GetRecommendations, ticker))
            }
        }
    }
}
