use serde::{Deserialize, Serialize};
use serde_json::Value;

use toolgate_core::Error;

/// A JSON-RPC 2.0 request.
///
/// `id` defaults to null when absent, which marks the request as a
/// notification (no response is produced for it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Whether this request is a notification (absent or null id).
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_null()
    }

    /// Check the envelope version tag. Returns the error response to send
    /// back when the tag is anything but `"2.0"`.
    ///
    /// # Errors
    ///
    /// Returns an `INVALID_REQUEST` response naming the offending tag.
    pub fn validate(&self) -> Result<(), JsonRpcResponse> {
        if self.jsonrpc == "2.0" {
            Ok(())
        } else {
            Err(JsonRpcResponse::error(
                self.id.clone(),
                INVALID_REQUEST,
                format!("Invalid JSON-RPC version '{}'", self.jsonrpc),
            ))
        }
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Map a dispatch-path error onto the wire.
    pub fn from_core_error(id: Value, err: &Error) -> Self {
        Self::error(id, error_code(err), err.to_string())
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Standard JSON-RPC error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// The wire code for a dispatch-path error.
#[must_use]
pub fn error_code(err: &Error) -> i32 {
    match err {
        Error::UnknownTool(_) | Error::HandlerMissing(_) => METHOD_NOT_FOUND,
        Error::InvalidParams { .. } => INVALID_PARAMS,
        Error::DuplicateTool(_) | Error::Internal(_) => INTERNAL_ERROR,
    }
}
