//! Records backend provider
//!
//! CRUD tools over the tables of a no-code backend instance. Every tool is
//! one HTTP request against the `{verb}/{table}` REST surface, with the
//! instance passed as a query parameter and the API key as a bearer token.

use crate::config::RecordsConfig;
use crate::error::Result;
use crate::registry::{ParamMap, ParamSpec, Registry, RoutingConfig, ToolSpec};
use secrecy::ExposeSecret;
use serde_json::{json, Value};

/// Register CRUD tools for every configured table.
pub fn register(registry: &mut Registry, config: &RecordsConfig) -> Result<usize> {
    let mut count = 0;
    for table in &config.tables {
        let specs = table_tools(config, table);
        count += registry.register_all(&config.namespace, specs)?;
    }
    Ok(count)
}

fn http(config: &RecordsConfig, method: &str, url: String, body_param: Option<&str>) -> RoutingConfig {
    let mut routing = json!({
        "method": method,
        "url": url,
        "headers": {
            "Authorization": format!("Bearer {}", config.api_key.expose_secret()),
            "Content-Type": "application/json",
            "Accept": "application/json",
        },
    });
    if let Some(param) = body_param {
        routing["body_param"] = Value::String(param.to_string());
    }
    if let Some(timeout) = config.timeout {
        routing["timeout"] = json!(timeout);
    }
    RoutingConfig::new("http", routing)
}

fn table_tools(config: &RecordsConfig, table: &str) -> Vec<ToolSpec> {
    let base = config.base_url.trim_end_matches('/');
    let instance = &config.instance;
    let upper = table.to_uppercase();

    let mut create_params = ParamMap::new();
    create_params.insert(
        "record".to_string(),
        ParamSpec::object(format!("{} fields to store", table)),
    );

    let mut read_params = ParamMap::new();
    read_params.insert(
        "limit".to_string(),
        ParamSpec::integer_with_default("Maximum number of records to return", 100),
    );
    read_params.insert(
        "offset".to_string(),
        ParamSpec::integer_with_default("Number of records to skip", 0),
    );

    let mut id_params = ParamMap::new();
    id_params.insert(
        "id".to_string(),
        ParamSpec::string(format!("The ID of the {} record", table)),
    );

    let mut search_params = ParamMap::new();
    search_params.insert(
        "search_criteria".to_string(),
        ParamSpec::object(format!("Field criteria for finding {} records", table)),
    );

    let mut update_params = ParamMap::new();
    update_params.insert(
        "id".to_string(),
        ParamSpec::string(format!("The ID of the {} record to update", table)),
    );
    update_params.insert(
        "record".to_string(),
        ParamSpec::object(format!("Updated {} fields", table)),
    );

    vec![
        ToolSpec::new(
            format!("NOCODEBACKEND_CREATE_{}", upper),
            format!("Create a new {} record", table),
            create_params,
            http(
                config,
                "POST",
                format!("{}/create/{}?Instance={}", base, table, instance),
                Some("record"),
            ),
        ),
        ToolSpec::new(
            format!("NOCODEBACKEND_READ_{}_RECORDS", upper),
            format!("Retrieve {} records", table),
            read_params,
            http(
                config,
                "GET",
                format!(
                    "{}/read/{}?Instance={}&limit={{limit}}&offset={{offset}}",
                    base, table, instance
                ),
                None,
            ),
        ),
        ToolSpec::new(
            format!("NOCODEBACKEND_READ_{}_BY_ID", upper),
            format!("Retrieve a specific {} record by ID", table),
            id_params.clone(),
            http(
                config,
                "GET",
                format!("{}/read/{}/{{id}}?Instance={}", base, table, instance),
                None,
            ),
        ),
        ToolSpec::new(
            format!("NOCODEBACKEND_SEARCH_{}_RECORDS", upper),
            format!("Search for {} records", table),
            search_params,
            http(
                config,
                "POST",
                format!("{}/search/{}?Instance={}", base, table, instance),
                Some("search_criteria"),
            ),
        ),
        ToolSpec::new(
            format!("NOCODEBACKEND_UPDATE_{}_BY_ID", upper),
            format!("Update an existing {} record", table),
            update_params,
            http(
                config,
                "PUT",
                format!("{}/update/{}/{{id}}?Instance={}", base, table, instance),
                Some("record"),
            ),
        ),
        ToolSpec::new(
            format!("NOCODEBACKEND_REMOVE_{}_BY_ID", upper),
            format!("Delete a {} record", table),
            id_params,
            http(
                config,
                "DELETE",
                format!("{}/delete/{}/{{id}}?Instance={}", base, table, instance),
                None,
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn config() -> RecordsConfig {
        RecordsConfig {
            namespace: "nocodebackend".to_string(),
            base_url: "https://api.nocodebackend.com".to_string(),
            instance: "49892_test_data".to_string(),
            api_key: SecretString::new("not-a-real-key".to_string()),
            tables: vec!["customer".to_string()],
            timeout: None,
        }
    }

    #[test]
    fn test_register_customer_table() {
        let mut registry = Registry::new();
        let count = register(&mut registry, &config()).unwrap();
        assert_eq!(count, 6);

        // The generic create verb collapses; the rest keep their
        // distinguishing verbs.
        assert!(registry.lookup("nocodebackend_customer").is_some());
        assert!(registry.lookup("nocodebackend_read_customer_records").is_some());
        assert!(registry.lookup("nocodebackend_read_customer_by_id").is_some());
        assert!(registry.lookup("nocodebackend_search_customer_records").is_some());
        assert!(registry.lookup("nocodebackend_customer_by_id").is_some());
        assert!(registry.lookup("nocodebackend_remove_customer_by_id").is_some());
    }

    #[test]
    fn test_routing_carries_instance_and_auth() {
        let mut registry = Registry::new();
        register(&mut registry, &config()).unwrap();

        let binding = registry.lookup("nocodebackend_read_customer_records").unwrap();
        let routing = &binding.definition.routing;
        assert_eq!(routing.routing_type(), "http");

        let url = routing.config["url"].as_str().unwrap();
        assert!(url.contains("Instance=49892_test_data"));
        assert!(url.contains("limit={limit}"));

        let auth = routing.config["headers"]["Authorization"].as_str().unwrap();
        assert!(auth.starts_with("Bearer "));
    }

    #[test]
    fn test_multiple_tables() {
        let mut registry = Registry::new();
        let mut cfg = config();
        cfg.tables.push("order".to_string());
        let count = register(&mut registry, &cfg).unwrap();
        assert_eq!(count, 12);
        assert!(registry.lookup("nocodebackend_order").is_some());
    }
}
