//! Stock data server.
//!
//! Spawned by a host process. Writes one manifest line to stdout, then reads
//! one JSON request per stdin line and writes one JSON response per line until
//! stdin closes. Logs go to stderr (`RUST_LOG` overrides the `info` default) so
//! stdout carries protocol lines only.
//!
//! Usage example:
//! ```bash
//! echo '{"function":"get_stock_info","arguments":{"ticker":"AAPL"}}' | stock_server
//! ```
#![warn(missing_docs)]
use std::io;

use clap::Parser;
use log::info;
use stock_common::Result;
use stock_server::args::Args;
use stock_server::provider::yahoo::{YahooConfig, YahooProvider};
use stock_server::{Dispatcher, serve};

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    info!("Using market data from {}", args.base_url);

    let provider = YahooProvider::new(YahooConfig::from(&args));
    let dispatcher = Dispatcher::new(provider);

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(stdin.lock(), stdout.lock(), &dispatcher)?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
