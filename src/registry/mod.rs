//! Tool registry: schema descriptions, definitions, and the canonical-name
//! registry

pub mod schema;
pub mod service;
pub mod types;

pub use schema::{apply_schema_defaults, to_json_schema, ParamKind, ParamMap, ParamSpec};
pub use service::{Registry, ToolBinding};
pub use types::{RoutingConfig, ToolDefinition, ToolSpec};
