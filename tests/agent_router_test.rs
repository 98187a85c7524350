//! Agent router integration tests against a mock HTTP server

use serde_json::json;
use toolbridge::mcp::types::ToolCall;
use toolbridge::registry::{ParamMap, RoutingConfig, ToolBinding, ToolDefinition};
use toolbridge::routing::{AgentRouter, DefaultAgentRouter};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn binding(name: &str, routing: RoutingConfig) -> ToolBinding {
    ToolBinding {
        namespace: "vendor".to_string(),
        raw_action: format!("VENDOR_{}", name.to_uppercase()),
        definition: ToolDefinition::new(
            name.to_string(),
            format!("{} test tool", name),
            toolbridge::registry::to_json_schema(&ParamMap::new()),
            routing,
        )
        .unwrap(),
    }
}

#[tokio::test]
async fn http_get_returns_body_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/read/customer"))
        .and(query_param("Instance", "49892_test_data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "name": "Ada"}]
        })))
        .mount(&server)
        .await;

    let routing = RoutingConfig::new(
        "http",
        json!({
            "method": "GET",
            "url": format!("{}/read/customer?Instance=49892_test_data", server.uri()),
        }),
    );

    let router = DefaultAgentRouter::new();
    let call = ToolCall::new("vendor_read".to_string(), json!({}));
    let result = router.route(&call, &binding("vendor_read", routing)).await.unwrap();

    assert!(result.success);
    let data = result.data.unwrap();
    assert_eq!(data["status"], 200);
    assert_eq!(data["body"]["data"][0]["name"], "Ada");
}

#[tokio::test]
async fn http_error_status_is_unsuccessful_not_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/read/customer"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let routing = RoutingConfig::new(
        "http",
        json!({
            "method": "GET",
            "url": format!("{}/read/customer", server.uri()),
        }),
    );

    let router = DefaultAgentRouter::new();
    let call = ToolCall::new("vendor_read".to_string(), json!({}));
    let result = router.route(&call, &binding("vendor_read", routing)).await.unwrap();

    assert!(!result.success);
    assert!(result.error.unwrap().contains("401"));
}

#[tokio::test]
async fn http_url_placeholders_are_substituted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/read/customer/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .mount(&server)
        .await;

    let routing = RoutingConfig::new(
        "http",
        json!({
            "method": "GET",
            "url": format!("{}/read/customer/{{id}}", server.uri()),
        }),
    );

    let router = DefaultAgentRouter::new();
    let call = ToolCall::new("vendor_read_by_id".to_string(), json!({"id": "42"}));
    let result = router
        .route(&call, &binding("vendor_read_by_id", routing))
        .await
        .unwrap();

    assert!(result.success);
}

#[tokio::test]
async fn http_body_param_sends_inner_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create/customer"))
        .and(body_json(json!({"name": "Ada", "email": "ada@example.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
        .mount(&server)
        .await;

    let routing = RoutingConfig::new(
        "http",
        json!({
            "method": "POST",
            "url": format!("{}/create/customer", server.uri()),
            "body_param": "record",
        }),
    );

    let router = DefaultAgentRouter::new();
    let call = ToolCall::new(
        "vendor_create".to_string(),
        json!({"record": {"name": "Ada", "email": "ada@example.com"}}),
    );
    let result = router
        .route(&call, &binding("vendor_create", routing))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.data.unwrap()["status"], 201);
}

#[tokio::test]
async fn cypher_statement_posted_to_commit_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/db/neo4j/tx/commit"))
        .and(body_json(json!({
            "statements": [{
                "statement": "RETURN 1 AS test",
                "parameters": {}
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"columns": ["test"], "data": [{"row": [1]}]}],
            "errors": []
        })))
        .mount(&server)
        .await;

    let routing = RoutingConfig::new(
        "cypher",
        json!({
            "endpoint": format!("{}/db/neo4j/tx/commit", server.uri()),
            "statement": "RETURN 1 AS test",
            "username": "neo4j",
            "password": "not-a-real-password",
        }),
    );

    let router = DefaultAgentRouter::new();
    let call = ToolCall::new("neo4j_test_connection".to_string(), json!({}));
    let result = router
        .route(&call, &binding("neo4j_test_connection", routing))
        .await
        .unwrap();

    assert!(result.success);
    let data = result.data.unwrap();
    assert_eq!(data["results"][0]["data"][0]["row"][0], 1);
}

#[tokio::test]
async fn cypher_statement_errors_surface_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/db/neo4j/tx/commit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "errors": [{
                "code": "Neo.ClientError.Statement.SyntaxError",
                "message": "Invalid input 'RETRUN'"
            }]
        })))
        .mount(&server)
        .await;

    let routing = RoutingConfig::new(
        "cypher",
        json!({
            "endpoint": format!("{}/db/neo4j/tx/commit", server.uri()),
            "statement": "RETRUN 1",
        }),
    );

    let router = DefaultAgentRouter::new();
    let call = ToolCall::new("neo4j_cypher_query".to_string(), json!({}));
    let result = router
        .route(&call, &binding("neo4j_cypher_query", routing))
        .await
        .unwrap();

    assert!(!result.success);
    assert!(result.error.unwrap().contains("Invalid input"));
}

#[tokio::test]
async fn echo_reports_resolved_provider_action() {
    let router = DefaultAgentRouter::new();
    let call = ToolCall::new("vendor_sync".to_string(), json!({"dry_run": true}));
    let result = router
        .route(
            &call,
            &binding("vendor_sync", RoutingConfig::new("echo", json!({}))),
        )
        .await
        .unwrap();

    assert!(result.success);
    let text = result.data.unwrap()["echo"].as_str().unwrap().to_string();
    assert!(text.contains("VENDOR_VENDOR_SYNC"));
    assert!(text.contains("dry_run"));
}
