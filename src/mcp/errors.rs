//! MCP-compliant error handling
//!
//! JSON-RPC 2.0 error codes and payloads for protocol responses.

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MCP-compliant error codes following JSON-RPC 2.0 specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpErrorCode {
    // Standard JSON-RPC error codes
    ParseError = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParams = -32602,
    InternalError = -32603,

    // MCP-specific error codes (above -32000 as per spec)
    ToolNotFound = -32000,
    ToolExecutionFailed = -31999,
    ValidationError = -31991,
}

impl McpErrorCode {
    /// Get the error code as i32
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get a default message for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            McpErrorCode::ParseError => "Parse error",
            McpErrorCode::InvalidRequest => "Invalid request",
            McpErrorCode::MethodNotFound => "Method not found",
            McpErrorCode::InvalidParams => "Invalid params",
            McpErrorCode::InternalError => "Internal error",
            McpErrorCode::ToolNotFound => "Tool not found",
            McpErrorCode::ToolExecutionFailed => "Tool execution failed",
            McpErrorCode::ValidationError => "Validation error",
        }
    }
}

/// MCP-compliant error structure following JSON-RPC 2.0 specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Additional error data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpError {
    /// Create an error from a code and message
    pub fn new(code: McpErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }
}

impl From<&BridgeError> for McpErrorCode {
    fn from(error: &BridgeError) -> Self {
        match error {
            BridgeError::Validation { .. } | BridgeError::Naming { .. } => {
                McpErrorCode::ValidationError
            }
            BridgeError::Registry { .. } => McpErrorCode::ToolNotFound,
            BridgeError::ToolExecution { .. } => McpErrorCode::ToolExecutionFailed,
            BridgeError::Serde(_) => McpErrorCode::ParseError,
            _ => McpErrorCode::InternalError,
        }
    }
}
