//! Registry types and structures

use crate::error::{BridgeError, Result};
use crate::mcp::types::Tool;
use crate::naming::DEFAULT_MAX_LENGTH;
use crate::registry::schema::ParamMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical names are lowercase alphanumerics and underscores. The
/// canonicalizer does not scrub other characters out of vendor identifiers,
/// so an illegal identifier is rejected here at registration instead of
/// being silently rewritten.
static TOOL_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").unwrap());

/// Routing configuration for a tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Routing type (http, cypher, echo)
    pub r#type: String,
    /// Configuration specific to the routing type
    pub config: Value,
}

impl RoutingConfig {
    /// Create a new routing configuration
    pub fn new(routing_type: impl Into<String>, config: Value) -> Self {
        Self {
            r#type: routing_type.into(),
            config,
        }
    }

    /// Validate the routing configuration
    pub fn validate(&self) -> Result<()> {
        if self.r#type.trim().is_empty() {
            return Err(BridgeError::validation("Routing type cannot be empty"));
        }

        match self.r#type.as_str() {
            "http" => self.validate_http_config(),
            "cypher" => self.validate_cypher_config(),
            "echo" => Ok(()),
            other => Err(BridgeError::validation(format!(
                "Unknown routing type: {}",
                other
            ))),
        }
    }

    fn validate_http_config(&self) -> Result<()> {
        if self.config.get("url").is_none() {
            return Err(BridgeError::validation("HTTP routing requires 'url' field"));
        }
        if self.config.get("method").is_none() {
            return Err(BridgeError::validation(
                "HTTP routing requires 'method' field",
            ));
        }
        Ok(())
    }

    fn validate_cypher_config(&self) -> Result<()> {
        if self.config.get("endpoint").is_none() {
            return Err(BridgeError::validation(
                "Cypher routing requires 'endpoint' field",
            ));
        }
        if self.config.get("statement").is_none() {
            return Err(BridgeError::validation(
                "Cypher routing requires 'statement' field",
            ));
        }
        Ok(())
    }

    /// Get the routing type
    pub fn routing_type(&self) -> &str {
        &self.r#type
    }
}

/// A provider's raw declaration of one action, before canonicalization.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// The provider's own identifier for the action, any case and separator
    /// style
    pub raw_name: String,
    /// Human-readable description
    pub description: String,
    /// Input parameter descriptions
    pub params: ParamMap,
    /// How calls to this action are dispatched
    pub routing: RoutingConfig,
}

impl ToolSpec {
    pub fn new(
        raw_name: impl Into<String>,
        description: impl Into<String>,
        params: ParamMap,
        routing: RoutingConfig,
    ) -> Self {
        Self {
            raw_name: raw_name.into(),
            description: description.into(),
            params,
            routing,
        }
    }
}

/// Tool definition with routing information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Canonical tool name (unique identifier)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    /// Routing configuration
    pub routing: RoutingConfig,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: String,
        description: String,
        input_schema: Value,
        routing: RoutingConfig,
    ) -> Result<Self> {
        let definition = Self {
            name,
            description,
            input_schema,
            routing,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// Validate the tool definition
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(BridgeError::validation("Tool name cannot be empty"));
        }

        if !TOOL_NAME_RE.is_match(&self.name) {
            return Err(BridgeError::validation(format!(
                "Tool name '{}' contains characters outside [a-z0-9_]",
                self.name
            )));
        }

        if self.name.chars().count() > DEFAULT_MAX_LENGTH {
            return Err(BridgeError::validation(format!(
                "Tool name '{}' exceeds {} characters",
                self.name, DEFAULT_MAX_LENGTH
            )));
        }

        if self.description.is_empty() {
            return Err(BridgeError::validation("Tool description cannot be empty"));
        }

        if !self.input_schema.is_object() {
            return Err(BridgeError::validation("Input schema must be a JSON object"));
        }

        self.routing.validate()?;

        Ok(())
    }

    /// Convert to MCP Tool
    pub fn to_mcp_tool(&self) -> Tool {
        Tool {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            input_schema: self.input_schema.clone(),
        }
    }

    /// Validate arguments for this tool against its input schema
    pub fn validate_arguments(&self, arguments: &Value) -> Result<()> {
        self.to_mcp_tool().validate_arguments(arguments)
    }

    /// Get the routing type
    pub fn routing_type(&self) -> &str {
        self.routing.routing_type()
    }
}
