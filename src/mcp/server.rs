//! MCP server: JSON-RPC request handling and the stdio transport

use crate::config::ServerConfig;
use crate::error::{BridgeError, Result};
use crate::mcp::errors::McpErrorCode;
use crate::mcp::types::{McpRequest, Tool, ToolCall, ToolResult};
use crate::registry::{apply_schema_defaults, Registry};
use crate::routing::types::AgentResult;
use crate::routing::{AgentRouter, DefaultAgentRouter};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Protocol revision advertised during the handshake
const PROTOCOL_VERSION: &str = "2025-06-18";

/// MCP server bridging registered tools to their provider agents
pub struct McpServer {
    name: String,
    version: String,
    registry: Arc<Registry>,
    router: Arc<dyn AgentRouter>,
}

impl McpServer {
    /// Create a server over a built registry.
    pub fn new(server_config: &ServerConfig, registry: Registry) -> Self {
        Self {
            name: server_config.name.clone(),
            version: server_config.version.clone(),
            registry: Arc::new(registry),
            router: Arc::new(DefaultAgentRouter::new()),
        }
    }

    /// Replace the agent router.
    pub fn with_router(mut self, router: Arc<dyn AgentRouter>) -> Self {
        self.router = router;
        self
    }

    /// The shared registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// List all advertised tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry.tools()
    }

    /// Execute a tool call end to end: resolve the binding, fill schema
    /// defaults, validate arguments, dispatch, format.
    pub async fn call_tool(&self, mut tool_call: ToolCall) -> Result<ToolResult> {
        tool_call.validate()?;

        let binding = self.registry.lookup(&tool_call.name).ok_or_else(|| {
            BridgeError::registry(format!("Tool '{}' not found", tool_call.name))
        })?;

        apply_schema_defaults(&binding.definition.input_schema, &mut tool_call.arguments);
        binding.definition.validate_arguments(&tool_call.arguments)?;

        debug!(
            tool = %tool_call.name,
            namespace = %binding.namespace,
            raw_action = %binding.raw_action,
            "dispatching tool call"
        );

        let result = self.router.route(&tool_call, binding).await?;
        Ok(Self::format_result(result))
    }

    /// Render an agent result as MCP text content.
    fn format_result(result: AgentResult) -> ToolResult {
        if result.success {
            let text = match &result.data {
                Some(Value::Object(map)) if map.len() == 1 && map.contains_key("echo") => {
                    map["echo"].as_str().unwrap_or_default().to_string()
                }
                Some(data) => {
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
                }
                None => "OK".to_string(),
            };
            match result.metadata {
                Some(metadata) => ToolResult::success_with_metadata(text, metadata),
                None => ToolResult::success(text),
            }
        } else {
            ToolResult::error(
                result
                    .error
                    .unwrap_or_else(|| "Tool execution failed".to_string()),
            )
        }
    }

    /// Handle a single MCP request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: McpRequest) -> Result<Option<String>> {
        debug!("Handling MCP method: {}", request.method);

        let response = match request.method.as_str() {
            "initialize" => {
                let result = json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": self.name,
                        "version": self.version,
                    }
                });
                if let Some(ref id) = request.id {
                    Self::create_success_response(id, result)
                } else {
                    Self::create_error_response(
                        None,
                        McpErrorCode::InvalidRequest,
                        "Initialize request must have an ID",
                    )
                }
            }
            "initialized" | "notifications/initialized" => {
                // Initialization complete notification, no response needed
                return Ok(None);
            }
            "ping" => {
                if let Some(ref id) = request.id {
                    Self::create_success_response(id, json!({}))
                } else {
                    Self::create_error_response(
                        None,
                        McpErrorCode::InvalidRequest,
                        "Request must have an ID",
                    )
                }
            }
            "tools/list" => {
                let tools = self.list_tools();
                if let Some(ref id) = request.id {
                    Self::create_success_response(id, json!({ "tools": tools }))
                } else {
                    Self::create_error_response(
                        None,
                        McpErrorCode::InvalidRequest,
                        "Request must have an ID",
                    )
                }
            }
            "tools/call" => {
                let params = request.params.unwrap_or(json!({}));
                match serde_json::from_value::<ToolCall>(params) {
                    Ok(tool_call) => match self.call_tool(tool_call).await {
                        Ok(result) => {
                            if let Some(ref id) = request.id {
                                Self::create_success_response(
                                    id,
                                    json!({
                                        "content": result.content,
                                        "isError": result.is_error,
                                    }),
                                )
                            } else {
                                Self::create_error_response(
                                    None,
                                    McpErrorCode::InvalidRequest,
                                    "Request must have an ID",
                                )
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, category = e.category(), "tool call failed");
                            Self::create_error_response(
                                request.id.as_ref(),
                                McpErrorCode::from(&e),
                                &e.to_string(),
                            )
                        }
                    },
                    Err(e) => Self::create_error_response(
                        request.id.as_ref(),
                        McpErrorCode::InvalidParams,
                        &format!("Invalid tool call parameters: {}", e),
                    ),
                }
            }
            _ => Self::create_error_response(
                request.id.as_ref(),
                McpErrorCode::MethodNotFound,
                &format!("Method not found: {}", request.method),
            ),
        };

        Ok(Some(response))
    }

    /// Create a success JSON-RPC response
    fn create_success_response(id: &Value, result: Value) -> String {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result,
        })
        .to_string()
    }

    /// Create an error JSON-RPC response
    fn create_error_response(id: Option<&Value>, code: McpErrorCode, message: &str) -> String {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {
                "code": code.code(),
                "message": message,
            }
        })
        .to_string()
    }

    /// Run the stdio transport: line-delimited JSON-RPC over stdin/stdout.
    ///
    /// Diagnostics go to stderr via tracing; stdout carries only protocol
    /// frames.
    pub async fn run_stdio(&self) -> Result<()> {
        use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        info!(
            tool_count = self.registry.len(),
            "stdio mode ready - waiting for JSON-RPC messages"
        );

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("stdin closed, shutting down stdio mode");
                    break;
                }
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    let response = self.handle_message(trimmed).await;
                    if let Some(response) = response {
                        stdout.write_all(response.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handle one raw JSON-RPC frame.
    async fn handle_message(&self, message: &str) -> Option<String> {
        let request: McpRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(Self::create_error_response(
                    None,
                    McpErrorCode::ParseError,
                    &format!("Invalid JSON: {}", e),
                ));
            }
        };

        match self.handle_request(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error handling message: {}", e);
                Some(Self::create_error_response(
                    None,
                    McpErrorCode::InternalError,
                    &format!("Internal error: {}", e),
                ))
            }
        }
    }
}
