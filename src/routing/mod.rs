//! Routing layer: dispatching tool calls to agents

pub mod agent_router;
pub mod substitution;
pub mod types;

pub use agent_router::{AgentRouter, DefaultAgentRouter};
pub use types::{AgentResult, AgentType};
