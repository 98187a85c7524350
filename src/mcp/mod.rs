//! MCP protocol implementation

pub mod errors;
pub mod server;
pub mod types;

pub use errors::{McpError, McpErrorCode};
pub use server::McpServer;
pub use types::{McpRequest, McpResponse, Tool, ToolCall, ToolContent, ToolResult};
