//! toolbridge - MCP server exposing vendor API actions as clean tools
//!
//! This crate bridges external provider APIs (a vendor action catalog, a
//! records backend, a graph store) into a flat set of MCP tools. Verbose
//! vendor action identifiers are canonicalized into short, length-bounded
//! tool names; each tool call is dispatched as a single HTTP request or
//! graph query and formatted as text.

pub mod config;
pub mod error;
pub mod mcp;
pub mod naming;
pub mod providers;
pub mod registry;
pub mod routing;

pub use config::Config;
pub use error::{BridgeError, Result};
pub use naming::{NameCanonicalizer, NamingPolicy};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "toolbridge.yaml";
