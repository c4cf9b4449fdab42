//! Common test utilities for driftls integration tests.
//!
//! Provides frame helpers and an in-memory writer whose buffer stays readable
//! after the server consumed its input and the serve loop returned.
#![allow(dead_code)]

use driftls::Server;
use serde_json::Value;
use std::io::Cursor;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;

/// An `AsyncWrite` into a shared buffer, so the test keeps a handle to the
/// bytes the server wrote.
#[derive(Clone, Default)]
pub struct SharedWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
    /// Everything written so far.
    pub fn written(&self) -> Vec<u8> {
        self.buffer.lock().unwrap().clone()
    }
}

impl AsyncWrite for SharedWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Frame a JSON body the way a client would.
pub fn frame(body: &str) -> Vec<u8> {
    format!("Content-Length: {}\r\n\r\n{}", body.len(), body).into_bytes()
}

/// Split a byte stream of frames back into its JSON messages.
pub fn parse_frames(mut bytes: &[u8]) -> Vec<Value> {
    let mut messages = Vec::new();

    while !bytes.is_empty() {
        let text = std::str::from_utf8(bytes).expect("frame headers are UTF-8");
        let header_end = text.find("\r\n\r\n").expect("header block terminator");
        let length: usize = text[..header_end]
            .strip_prefix("Content-Length: ")
            .expect("Content-Length header")
            .parse()
            .expect("numeric Content-Length");

        let body_start = header_end + 4;
        let body = &bytes[body_start..body_start + length];
        messages.push(serde_json::from_slice(body).expect("frame body is JSON"));

        bytes = &bytes[body_start + length..];
    }

    messages
}

/// Feed the given client messages to a fresh server, run it until the input
/// stream ends, and return every server-to-client message in order.
///
/// The loop only ever terminates with an error; end of input surfaces as an
/// IO error, which is the expected "graceful" shutdown for this server.
pub async fn run_session(bodies: &[Value]) -> Vec<Value> {
    let mut input = Vec::new();
    for body in bodies {
        input.extend(frame(&body.to_string()));
    }

    let writer = SharedWriter::default();
    let mut server = Server::new(Cursor::new(input), writer.clone());

    let result = server.serve().await;
    assert!(
        matches!(result, Err(driftls::LspError::Io(_))),
        "serve should end with the stream-closed IO error, got: {result:?}"
    );

    parse_frames(&writer.written())
}
