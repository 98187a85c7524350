//! Tool registry keyed by canonical name
//!
//! Registration resolves each provider action through the shared
//! [`NameCanonicalizer`] and stores the binding from canonical name back to
//! `(namespace, raw action)`. Dispatch looks the binding up instead of
//! guessing the provider action from the advertised name.

use crate::error::{BridgeError, Result};
use crate::mcp::types::Tool;
use crate::naming::NameCanonicalizer;
use crate::registry::schema::to_json_schema;
use crate::registry::types::{ToolDefinition, ToolSpec};
use std::collections::HashMap;
use tracing::{debug, info};

/// Binding from a canonical name back to the provider action it came from.
#[derive(Debug, Clone)]
pub struct ToolBinding {
    /// Provider namespace the action belongs to
    pub namespace: String,
    /// The provider's raw identifier for the action
    pub raw_action: String,
    /// The registered tool definition
    pub definition: ToolDefinition,
}

/// In-process tool registry.
///
/// Built once at startup, then read-only; the server shares it behind an
/// `Arc` without locking.
#[derive(Debug, Default)]
pub struct Registry {
    canonicalizer: NameCanonicalizer,
    bindings: HashMap<String, ToolBinding>,
    /// Registration order, for stable `tools/list` output
    order: Vec<String>,
}

impl Registry {
    /// Create a registry with the default naming policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with an explicit canonicalizer.
    pub fn with_canonicalizer(canonicalizer: NameCanonicalizer) -> Self {
        Self {
            canonicalizer,
            bindings: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// The shared canonicalizer.
    pub fn canonicalizer(&self) -> &NameCanonicalizer {
        &self.canonicalizer
    }

    /// Register one provider action under its canonical name.
    ///
    /// Rejects canonical-name collisions: two distinct actions reducing to
    /// the same name is a provider configuration error, not something to
    /// paper over with suffixes.
    pub fn register(&mut self, namespace: &str, spec: ToolSpec) -> Result<String> {
        let canonical = self
            .canonicalizer
            .canonicalize(namespace, &spec.raw_name)?;

        if let Some(existing) = self.bindings.get(&canonical) {
            return Err(BridgeError::registry(format!(
                "Canonical name collision: '{}' maps both '{}/{}' and '{}/{}'",
                canonical, existing.namespace, existing.raw_action, namespace, spec.raw_name
            )));
        }

        let definition = ToolDefinition::new(
            canonical.clone(),
            spec.description,
            to_json_schema(&spec.params),
            spec.routing,
        )?;

        debug!(
            namespace = namespace,
            raw_action = %spec.raw_name,
            canonical = %canonical,
            "registered tool"
        );

        self.bindings.insert(
            canonical.clone(),
            ToolBinding {
                namespace: namespace.to_string(),
                raw_action: spec.raw_name,
                definition,
            },
        );
        self.order.push(canonical.clone());

        Ok(canonical)
    }

    /// Register every action of a provider namespace.
    pub fn register_all(&mut self, namespace: &str, specs: Vec<ToolSpec>) -> Result<usize> {
        let count = specs.len();
        for spec in specs {
            self.register(namespace, spec)?;
        }
        info!(namespace = namespace, count = count, "provider registered");
        Ok(count)
    }

    /// Look up the binding for a canonical name.
    pub fn lookup(&self, canonical_name: &str) -> Option<&ToolBinding> {
        self.bindings.get(canonical_name)
    }

    /// All advertised tools, in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.order
            .iter()
            .filter_map(|name| self.bindings.get(name))
            .map(|binding| binding.definition.to_mcp_tool())
            .collect()
    }

    /// All bindings, in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = &ToolBinding> {
        self.order.iter().filter_map(|name| self.bindings.get(name))
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry holds no tools.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
