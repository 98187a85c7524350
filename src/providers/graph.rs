//! Graph store provider
//!
//! Tools over a Neo4j knowledge graph. Each tool is a single parameterized
//! Cypher statement executed through the HTTP transactional commit endpoint.
//! Labels and relationship types are substituted into the statement text;
//! value parameters travel in the statement's parameter map.

use crate::config::GraphConfig;
use crate::error::Result;
use crate::registry::{ParamKind, ParamMap, ParamSpec, Registry, RoutingConfig, ToolSpec};
use secrecy::ExposeSecret;
use serde_json::json;

/// Register the graph store tools.
pub fn register(registry: &mut Registry, config: &GraphConfig) -> Result<usize> {
    registry.register_all(&config.namespace, graph_tools(config))
}

fn cypher(config: &GraphConfig, statement: &str) -> RoutingConfig {
    let endpoint = format!(
        "{}/db/{}/tx/commit",
        config.uri.trim_end_matches('/'),
        config.database
    );
    let mut routing = json!({
        "endpoint": endpoint,
        "statement": statement,
        "username": config.username,
        "password": config.password.expose_secret(),
    });
    if let Some(timeout) = config.timeout {
        routing["timeout"] = json!(timeout);
    }
    RoutingConfig::new("cypher", routing)
}

fn graph_tools(config: &GraphConfig) -> Vec<ToolSpec> {
    let mut query_params = ParamMap::new();
    query_params.insert(
        "query".to_string(),
        ParamSpec::string("Cypher statement to execute"),
    );

    let mut upsert_params = ParamMap::new();
    upsert_params.insert("label".to_string(), ParamSpec::string("Node label"));
    upsert_params.insert("name".to_string(), ParamSpec::string("Node name"));
    upsert_params.insert(
        "properties".to_string(),
        ParamSpec {
            kind: ParamKind::Object,
            description: "Additional node properties".to_string(),
            required: false,
            default: Some(json!({})),
        },
    );

    let mut relate_params = ParamMap::new();
    relate_params.insert("from".to_string(), ParamSpec::string("Source node name"));
    relate_params.insert("to".to_string(), ParamSpec::string("Target node name"));
    relate_params.insert(
        "rel_type".to_string(),
        ParamSpec::string("Relationship type"),
    );

    vec![
        ToolSpec::new(
            "NEO4J_TEST_CONNECTION",
            "Test the graph database connection",
            ParamMap::new(),
            cypher(config, "RETURN 1 AS test"),
        ),
        ToolSpec::new(
            "NEO4J_RUN_CYPHER_QUERY",
            "Execute a Cypher statement",
            query_params,
            cypher(config, "{query}"),
        ),
        ToolSpec::new(
            "NEO4J_UPSERT_NODE",
            "Create or update a named node",
            upsert_params,
            cypher(
                config,
                "MERGE (n:{label} {name: $name}) SET n += $properties RETURN n",
            ),
        ),
        ToolSpec::new(
            "NEO4J_RELATE_NODES",
            "Create a relationship between two named nodes",
            relate_params,
            cypher(
                config,
                "MATCH (a {name: $from}) MATCH (b {name: $to}) \
                 MERGE (a)-[r:{rel_type}]->(b) RETURN type(r) AS created",
            ),
        ),
        ToolSpec::new(
            "NEO4J_GET_GRAPH_STATS",
            "Count nodes by label",
            ParamMap::new(),
            cypher(
                config,
                "MATCH (n) RETURN labels(n)[0] AS label, count(n) AS count ORDER BY count DESC",
            ),
        ),
        ToolSpec::new(
            "NEO4J_GET_RELATIONSHIP_STATS",
            "Count relationships by type",
            ParamMap::new(),
            cypher(
                config,
                "MATCH ()-[r]->() RETURN type(r) AS relationship_type, count(r) AS count \
                 ORDER BY count DESC",
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn config() -> GraphConfig {
        GraphConfig {
            namespace: "neo4j".to_string(),
            uri: "http://localhost:7474".to_string(),
            database: "bookhubdata".to_string(),
            username: "neo4j".to_string(),
            password: SecretString::new("not-a-real-password".to_string()),
            timeout: None,
        }
    }

    #[test]
    fn test_register_graph_tools() {
        let mut registry = Registry::new();
        let count = register(&mut registry, &config()).unwrap();
        assert_eq!(count, 6);

        assert!(registry.lookup("neo4j_test_connection").is_some());
        // "run_" is a noise prefix, so the query tool loses its verb.
        assert!(registry.lookup("neo4j_cypher_query").is_some());
        assert!(registry.lookup("neo4j_upsert_node").is_some());
        assert!(registry.lookup("neo4j_relate_nodes").is_some());
        // "get_" is stripped from the stats tools.
        assert!(registry.lookup("neo4j_graph_stats").is_some());
        assert!(registry.lookup("neo4j_relationship_stats").is_some());
    }

    #[test]
    fn test_endpoint_includes_database() {
        let mut registry = Registry::new();
        register(&mut registry, &config()).unwrap();

        let binding = registry.lookup("neo4j_graph_stats").unwrap();
        let endpoint = binding.definition.routing.config["endpoint"]
            .as_str()
            .unwrap();
        assert_eq!(endpoint, "http://localhost:7474/db/bookhubdata/tx/commit");
    }
}
