//! Transport layer for the Language Server Protocol.
//!
//! This module implements the base protocol framing: a header block terminated
//! by an empty line, of which only `Content-Length` is consumed, followed by a
//! byte-exact payload.

use crate::error::{LspError, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Framed reader/writer pair for LSP messages.
///
/// The payload is handed back verbatim as bytes; JSON interpretation happens a
/// layer above.
pub struct Transport<R, W> {
    reader: R,
    writer: W,
}

impl<R: AsyncRead + Unpin, W: AsyncWrite + Unpin> Transport<R, W> {
    /// Create a new transport with the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read one frame and return its payload.
    ///
    /// Reaching end of stream at any point, mid-header or mid-body, is an IO
    /// error; the caller treats it as fatal.
    pub async fn read_frame(&mut self) -> Result<Vec<u8>> {
        let content_length = self.read_headers().await?;

        let mut payload = vec![0u8; content_length];
        self.reader.read_exact(&mut payload).await?;
        Ok(payload)
    }

    /// Write a frame around the given payload and flush.
    ///
    /// Only the `Content-Length` header is emitted.
    pub async fn write_frame(&mut self, payload: &[u8]) -> Result<()> {
        let header = format!("Content-Length: {}\r\n\r\n", payload.len());
        self.writer.write_all(header.as_bytes()).await?;
        self.writer.write_all(payload).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Consume the transport, returning the writer and whatever it buffered.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Read header lines until the blank separator, returning the announced
    /// content length.
    async fn read_headers(&mut self) -> Result<usize> {
        let mut content_length = None;

        loop {
            let line = self.read_line().await?;

            // Empty line indicates end of headers
            if line.is_empty() {
                break;
            }

            // Header lines without a separator, and headers other than
            // Content-Length, are ignored.
            if let Some((name, value)) = line.split_once(": ") {
                if name.to_lowercase() == "content-length" {
                    content_length = Some(value.trim().parse::<usize>().map_err(|_| {
                        LspError::Transport(format!("invalid Content-Length: {value:?}"))
                    })?);
                }
            }
        }

        content_length.ok_or_else(|| LspError::Transport("missing Content-Length header".into()))
    }

    /// Read a single header line, terminated by `\n` with an optional `\r`
    /// before it. The terminator is stripped.
    async fn read_line(&mut self) -> Result<String> {
        let mut line = Vec::new();

        loop {
            let mut byte = [0u8; 1];
            self.reader.read_exact(&mut byte).await?;

            if byte[0] == b'\n' {
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                break;
            }

            line.push(byte[0]);
        }

        String::from_utf8(line)
            .map_err(|e| LspError::Transport(format!("invalid UTF-8 in header: {e}")))
    }
}
