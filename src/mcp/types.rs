//! MCP protocol types
//!
//! Type definitions for the subset of the Model Context Protocol this server
//! speaks: tool advertisement, tool invocation, and JSON-RPC 2.0 framing.

use crate::error::{BridgeError, Result};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mcp::errors::McpError;

/// MCP Tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (unique identifier)
    pub name: String,
    /// Human-readable description (optional for compatibility)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl Tool {
    /// Create a new Tool with validation
    pub fn new(name: String, description: String, input_schema: Value) -> Result<Self> {
        let tool = Tool {
            name,
            description: Some(description),
            input_schema,
        };
        tool.validate()?;
        Ok(tool)
    }

    /// Validate the tool definition
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BridgeError::validation("Tool name cannot be empty"));
        }

        if let Some(ref desc) = self.description {
            if desc.trim().is_empty() {
                return Err(BridgeError::validation("Tool description cannot be empty"));
            }
        }

        self.validate_input_schema()?;

        Ok(())
    }

    /// Validate that the input schema is a valid JSON Schema
    pub fn validate_input_schema(&self) -> Result<()> {
        match JSONSchema::compile(&self.input_schema) {
            Ok(_) => Ok(()),
            Err(e) => Err(BridgeError::validation(format!(
                "Invalid JSON Schema for tool '{}': {}",
                self.name, e
            ))),
        }
    }

    /// Validate arguments against the input schema
    pub fn validate_arguments(&self, arguments: &Value) -> Result<()> {
        let schema = JSONSchema::compile(&self.input_schema).map_err(|e| {
            BridgeError::validation(format!(
                "Failed to compile schema for tool '{}': {}",
                self.name, e
            ))
        })?;

        match schema.validate(arguments) {
            Ok(_) => Ok(()),
            Err(errors) => {
                let error_messages: Vec<String> =
                    errors.map(|e| format!("  - {}", e)).collect();
                Err(BridgeError::validation(format!(
                    "Invalid arguments for tool '{}': \n{}",
                    self.name,
                    error_messages.join("\n")
                )))
            }
        }
    }
}

/// Tool call request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name to call
    pub name: String,
    /// Arguments for the tool
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(name: String, arguments: Value) -> Self {
        Self { name, arguments }
    }

    /// Validate the tool call
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BridgeError::validation("Tool call name cannot be empty"));
        }
        Ok(())
    }
}

/// MCP-compliant content for tool results. Every bridged response is
/// formatted as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    /// Text content
    #[serde(rename = "text")]
    Text {
        /// Text content
        text: String,
    },
}

impl ToolContent {
    /// Create text content
    pub fn text(text: String) -> Self {
        Self::Text { text }
    }
}

/// Tool call result (MCP-compliant format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the call was successful
    pub success: bool,
    /// MCP-compliant error flag (required by MCP specification)
    #[serde(rename = "isError")]
    pub is_error: bool,
    /// Content array for MCP-compliant responses
    pub content: Vec<ToolContent>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ToolResult {
    /// Create a successful result with text content
    pub fn success(text: String) -> Self {
        Self {
            success: true,
            is_error: false,
            content: vec![ToolContent::text(text)],
            error: None,
            metadata: None,
        }
    }

    /// Create a successful result with metadata
    pub fn success_with_metadata(text: String, metadata: Value) -> Self {
        Self {
            success: true,
            is_error: false,
            content: vec![ToolContent::text(text)],
            error: None,
            metadata: Some(metadata),
        }
    }

    /// Create an error result
    pub fn error(error: String) -> Self {
        let content = vec![ToolContent::text(format!("Error: {}", error))];
        Self {
            success: false,
            is_error: true,
            content,
            error: Some(error),
            metadata: None,
        }
    }

    /// Validate the result structure (MCP-compliant)
    pub fn validate(&self) -> Result<()> {
        if self.success && self.is_error {
            return Err(BridgeError::validation(
                "Result cannot be both successful and error",
            ));
        }

        if !self.success && !self.is_error {
            return Err(BridgeError::validation(
                "Failed result must have is_error set to true",
            ));
        }

        if !self.success && self.error.is_none() {
            return Err(BridgeError::validation(
                "Failed result must have an error message",
            ));
        }

        if self.content.is_empty() {
            return Err(BridgeError::validation(
                "Tool result must have at least one content item",
            ));
        }

        Ok(())
    }
}

/// MCP Request message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID (string, number, or null for notifications)
    pub id: Option<Value>,
    /// Method name
    pub method: String,
    /// Parameters
    pub params: Option<Value>,
}

/// MCP Response message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID this responds to
    pub id: Option<Value>,
    /// Result (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_serializes_input_schema_field_name() {
        let tool = Tool::new(
            "github_issue".to_string(),
            "Create a GitHub issue".to_string(),
            json!({"type": "object", "properties": {}}),
        )
        .unwrap();

        let value = serde_json::to_value(&tool).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn test_validate_arguments_against_schema() {
        let tool = Tool::new(
            "records_search".to_string(),
            "Search records".to_string(),
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string"}
                },
                "required": ["query"]
            }),
        )
        .unwrap();

        assert!(tool.validate_arguments(&json!({"query": "smith"})).is_ok());
        assert!(tool.validate_arguments(&json!({})).is_err());
        assert!(tool.validate_arguments(&json!({"query": 7})).is_err());
    }

    #[test]
    fn test_tool_result_consistency() {
        assert!(ToolResult::success("ok".to_string()).validate().is_ok());
        assert!(ToolResult::error("boom".to_string()).validate().is_ok());

        let inconsistent = ToolResult {
            success: true,
            is_error: true,
            content: vec![ToolContent::text("x".to_string())],
            error: None,
            metadata: None,
        };
        assert!(inconsistent.validate().is_err());
    }
}
