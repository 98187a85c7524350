//! Routing types and agent definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Agent types supported by the router
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AgentType {
    /// HTTP agent (one outbound request per call)
    #[serde(rename = "http")]
    Http {
        method: String,
        url: String,
        headers: Option<HashMap<String, String>>,
        /// Argument whose value becomes the request body; the full argument
        /// object is sent when unset
        body_param: Option<String>,
        timeout: Option<u64>,
    },

    /// Cypher agent (one transactional statement against a graph database)
    #[serde(rename = "cypher")]
    Cypher {
        /// Full transactional-commit endpoint URL
        endpoint: String,
        statement: String,
        username: Option<String>,
        password: Option<String>,
        timeout: Option<u64>,
    },

    /// Echo agent (formats the resolved call without invoking anything)
    #[serde(rename = "echo")]
    Echo,
}

/// Agent execution result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    /// Whether execution was successful
    pub success: bool,
    /// Result data
    pub data: Option<Value>,
    /// Error message if failed
    pub error: Option<String>,
    /// Execution metadata (timing, etc.)
    pub metadata: Option<Value>,
}

impl AgentResult {
    /// Successful result with data and metadata
    pub fn success(data: Value, metadata: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            metadata: Some(metadata),
        }
    }

    /// Failed result with an error message and metadata
    pub fn failure(error: String, metadata: Value) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            metadata: Some(metadata),
        }
    }
}
