//! JSON-RPC 2.0 message types as defined by the specification.
//!
//! Incoming traffic is decoded as [`RequestMessage`]; an absent or null `id`
//! marks it as a notification. `params` stays raw JSON until the dispatcher
//! knows which shape the method expects, so a malformed `params` never fails
//! envelope decoding.

use crate::error::ResponseError;
use crate::types::Id;
use serde::{Deserialize, Serialize};

/// An incoming request or notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestMessage {
    /// JSON-RPC version. Always "2.0".
    pub jsonrpc: String,
    /// The request ID; absent for notifications, which expect no reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    /// The method to be invoked.
    pub method: String,
    /// The method's parameters, decoded lazily.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl RequestMessage {
    /// Create a new request message.
    pub fn new(id: impl Into<Id>, method: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id.into()),
            method: method.into(),
            params: None,
        }
    }

    /// Create a new request message with parameters.
    pub fn with_params(
        id: impl Into<Id>,
        method: impl Into<String>,
        params: serde_json::Value,
    ) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id.into()),
            method: method.into(),
            params: Some(params),
        }
    }

    /// Whether this message is a notification (no id, no reply expected).
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Response message sent as a result of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// JSON-RPC version.
    pub jsonrpc: String,
    /// The request ID (same as the request, or null).
    pub id: Option<Id>,
    /// The result of a successful request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// The error object in case of failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

impl ResponseMessage {
    /// Create a successful response.
    pub fn success(id: Option<Id>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Id>, error: ResponseError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Check if this response represents an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Server-to-client notification message.
/// A notification must not be answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// JSON-RPC version.
    pub jsonrpc: String,
    /// The method to be invoked.
    pub method: String,
    /// The notification's parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl NotificationMessage {
    /// Create a new notification message with parameters.
    pub fn with_params(method: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params: Some(params),
        }
    }
}
