//! Error types for the language server.
//!
//! This module defines the fatal error type returned by the server loop as well
//! as the JSON-RPC error object sent back to the client in response messages.

use std::fmt;
use thiserror::Error;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, LspError>;

/// Errors that terminate the server loop.
///
/// Recoverable conditions (bad params, unknown method) are answered on the wire
/// as a [`ResponseError`] instead and never surface here.
#[derive(Error, Debug)]
pub enum LspError {
    /// IO errors from the transport layer, including end of stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors at the envelope level.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport protocol errors (malformed headers, etc.)
    #[error("Transport error: {0}")]
    Transport(String),
}

/// JSON-RPC error object carried in a response message.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResponseError {
    /// A number indicating the error type that occurred.
    pub code: i32,
    /// A string providing a short description of the error.
    pub message: String,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ResponseError {}

/// Error codes reserved by the JSON-RPC specification.
pub mod error_codes {
    /// Invalid JSON was received by the server.
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid Request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method does not exist / is not available.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameter(s).
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i32 = -32603;

    /// Start of the implementation-defined server-error range (unused here).
    pub const JSONRPC_RESERVED_ERROR_RANGE_START: i32 = -32099;
    /// End of the implementation-defined server-error range (unused here).
    pub const JSONRPC_RESERVED_ERROR_RANGE_END: i32 = -32000;
}

impl ResponseError {
    /// Create a new ResponseError with the given code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::PARSE_ERROR, message)
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_REQUEST, message)
    }

    /// Create a method not found error.
    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::new(error_codes::METHOD_NOT_FOUND, message)
    }

    /// Create an invalid params error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_PARAMS, message)
    }

    /// Create an internal error.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }
}
