//! Stock Client, a host process for the stock data server. It spawns the
//! server, reads its manifest line, sends a single request built from the
//! command line, prints the result, then closes the server's stdin so it exits.
//!
//! Usage example (CLI):
//! ```bash
//! stock_client --server ./target/release/stock_server history --ticker MSFT --period 3mo
//! ```
#![warn(missing_docs)]
mod args;
mod render;
mod session;

use crate::args::Args;
use crate::render::render;
use crate::session::ServerProcess;
use clap::Parser;
use log::{error, info};
use stock_common::Result;
use stock_common::StockError;

fn main() -> Result<(), StockError> {
    init_logger();
    let args = Args::parse();

    let mut server = ServerProcess::spawn(&args.server)?;
    let result = match args.call.to_request() {
        None => serde_json::to_value(server.session().manifest())?,
        Some(request) => {
            info!("Calling {} {:?}", request.function, request.arguments);
            match server.session().call(&request)?.into_result() {
                Ok(result) => result,
                Err(e) => {
                    error!("Server returned an error: {}", e);
                    server.shutdown()?;
                    return Err(e);
                }
            }
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in render(&args.call, result)? {
            println!("{}", line);
        }
    }

    server.shutdown()?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
