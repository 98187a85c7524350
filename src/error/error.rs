//! Error types and handling for toolbridge

use thiserror::Error;

/// Result type alias for toolbridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for toolbridge
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Registry errors
    #[error("Registry error: {message}")]
    Registry { message: String },

    /// Tool naming errors (invalid canonicalizer input)
    #[error("Naming error: {message}")]
    Naming { message: String },

    /// MCP protocol errors
    #[error("MCP protocol error: {message}")]
    Mcp { message: String },

    /// Routing errors
    #[error("Routing error: {message}")]
    Routing { message: String },

    /// Tool execution errors
    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl BridgeError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a registry error
    pub fn registry<S: Into<String>>(message: S) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create a naming error
    pub fn naming<S: Into<String>>(message: S) -> Self {
        Self::Naming {
            message: message.into(),
        }
    }

    /// Create an MCP protocol error
    pub fn mcp<S: Into<String>>(message: S) -> Self {
        Self::Mcp {
            message: message.into(),
        }
    }

    /// Create a routing error
    pub fn routing<S: Into<String>>(message: S) -> Self {
        Self::Routing {
            message: message.into(),
        }
    }

    /// Create a tool execution error
    pub fn tool_execution<S: Into<String>>(tool_name: S, message: S) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            BridgeError::Config { .. } => "config",
            BridgeError::Registry { .. } => "registry",
            BridgeError::Naming { .. } => "naming",
            BridgeError::Mcp { .. } => "mcp",
            BridgeError::Routing { .. } => "routing",
            BridgeError::ToolExecution { .. } => "tool_execution",
            BridgeError::Validation { .. } => "validation",
            BridgeError::Io(_) => "io",
            BridgeError::Serde(_) => "serialization",
            BridgeError::Yaml(_) => "yaml",
            BridgeError::Http(_) => "http",
            BridgeError::Internal(_) => "internal",
        }
    }
}
