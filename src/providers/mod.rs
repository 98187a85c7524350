//! Provider adapters
//!
//! Each provider turns its configuration section into raw tool declarations;
//! the registry canonicalizes and records them.

pub mod catalog;
pub mod graph;
pub mod records;

use crate::config::Config;
use crate::error::Result;
use crate::registry::Registry;
use tracing::info;

/// Build the tool registry for a configuration.
pub fn build_registry(config: &Config) -> Result<Registry> {
    let mut registry = Registry::with_canonicalizer(config.canonicalizer());

    if let Some(catalog_config) = &config.catalog {
        catalog::register(&mut registry, catalog_config)?;
    }
    if let Some(records_config) = &config.records {
        records::register(&mut registry, records_config)?;
    }
    if let Some(graph_config) = &config.graph {
        graph::register(&mut registry, graph_config)?;
    }

    info!(tool_count = registry.len(), "registry built");
    Ok(registry)
}
