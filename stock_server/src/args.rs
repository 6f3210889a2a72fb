//! Command-line arguments for the stock server.
//!
//! The server takes no positional input; everything here configures the
//! Yahoo Finance provider. Protocol traffic always uses stdin/stdout.
use std::time::Duration;

use clap::Parser;

use crate::provider::yahoo::YahooConfig;
use crate::net::{DEFAULT_BASE_URL, DEFAULT_COOKIE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the Yahoo Finance query API.
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// URL visited once to obtain the session cookie.
    #[clap(long, default_value = DEFAULT_COOKIE_URL)]
    pub cookie_url: String,

    /// Timeout in seconds for each HTTP request made to the provider.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// User-Agent header sent to the provider.
    #[clap(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl From<&Args> for YahooConfig {
    fn from(args: &Args) -> Self {
        YahooConfig {
            base_url: args.base_url.clone(),
            cookie_url: args.cookie_url.clone(),
            timeout: Duration::from_secs(args.timeout_secs),
            user_agent: args.user_agent.clone(),
        }
    }
}
