//! Talking to a spawned stock server over its stdin/stdout.
//!
//! `Session` speaks the protocol over any writer/reader pair: it reads the
//! manifest line first, then exchanges one request line for one response line.
//! `ServerProcess` owns the child process and closes its stdin on shutdown,
//! which is the server's cue to exit.
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;
use stock_common::protocol::{Manifest, Request, Response, write_line};
use stock_common::{Result, StockError};

/// Protocol session after the manifest handshake.
pub struct Session<W, R> {
    writer: W,
    reader: R,
    manifest: Manifest,
}

impl<W: Write, R: BufRead> Session<W, R> {
    /// Read the manifest the server writes on startup.
    pub fn handshake(writer: W, mut reader: R) -> Result<Self> {
        let manifest: Manifest = read_json_line(&mut reader)?;
        debug!("Manifest lists {} function(s)", manifest.functions.len());
        Ok(Self {
            writer,
            reader,
            manifest,
        })
    }

    /// The manifest received during the handshake.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Send one request and wait for its response line.
    pub fn call(&mut self, request: &Request) -> Result<Response<Value>> {
        write_line(&mut self.writer, request)?;
        read_json_line(&mut self.reader)
    }
}

/// A running server child process with an open session.
pub struct ServerProcess {
    child: Child,
    session: Session<ChildStdin, BufReader<ChildStdout>>,
}

impl ServerProcess {
    /// Spawn `program` with piped stdio and complete the handshake.
    pub fn spawn(program: &Path) -> Result<Self> {
        info!("Starting server {}", program.display());
        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| StockError::Protocol("server stdin is not piped".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| StockError::Protocol("server stdout is not piped".to_string()))?;

        let session = match Session::handshake(stdin, BufReader::new(stdout)) {
            Ok(session) => session,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        };
        Ok(Self { child, session })
    }

    /// The open session.
    pub fn session(&mut self) -> &mut Session<ChildStdin, BufReader<ChildStdout>> {
        &mut self.session
    }

    /// Close the server's stdin and wait for it to exit.
    pub fn shutdown(self) -> Result<ExitStatus> {
        let ServerProcess { mut child, session } = self;
        drop(session);
        let status = child.wait()?;
        info!("Server exited with {}", status);
        Ok(status)
    }
}

fn read_json_line<R: BufRead, T: DeserializeOwned>(reader: &mut R) -> Result<T> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(StockError::Protocol("server closed its output".to_string()));
    }
    Ok(serde_json::from_str(&line)?)
}
