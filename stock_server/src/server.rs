//! Line protocol loop.
//!
//! Writes the manifest, then answers every non-empty input line with exactly
//! one output line, in order, until the input reaches end-of-stream. A bad
//! line (invalid JSON, invalid UTF-8, failing request) only produces an error
//! line; the loop ends early only if the output itself can no longer be
//! written.

use std::io::{BufRead, Write};

use log::{debug, info, warn};
use serde_json::{Value, json};
use stock_common::Result;
use stock_common::protocol::{Response, write_line};

use crate::dispatcher::{Dispatcher, Payload};
use crate::manifest::server_manifest;
use crate::provider::MarketDataProvider;

const INVALID_JSON: &str = "Invalid JSON";

/// Run the protocol over `reader`/`writer` until `reader` is exhausted.
///
/// Returns the number of responses written after the manifest.
pub fn serve<R, W, P>(mut reader: R, mut writer: W, dispatcher: &Dispatcher<P>) -> Result<usize>
where
    R: BufRead,
    W: Write,
    P: MarketDataProvider,
{
    write_line(&mut writer, server_manifest())?;
    debug!("Manifest sent");

    let mut line = Vec::new();
    let mut answered = 0;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let request = strip_terminator(&line);
        if request.is_empty() {
            continue;
        }

        let response = match serde_json::from_slice::<Value>(request) {
            Ok(request) => dispatcher.handle(&request),
            Err(e) => {
                warn!("Rejecting malformed request line: {}", e);
                Response::Error(INVALID_JSON.to_string())
            }
        };
        write_line(&mut writer, &encode(&response))?;
        answered += 1;
    }

    info!("Input closed after {} request(s)", answered);
    Ok(answered)
}

/// The line without its `\n` or `\r\n`; any other whitespace is request content.
fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// Serialising to a value first means a failure never leaves half a line on the wire.
fn encode(response: &Response<Payload>) -> Value {
    serde_json::to_value(response).unwrap_or_else(|e| json!({"error": e.to_string()}))
}
