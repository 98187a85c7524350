//! AgentRouter trait and implementations for dispatching tool calls
//!
//! Every dispatch is a single request/response round trip. There is no
//! retry, pooling, or ordering here; a failed call surfaces as an
//! unsuccessful [`AgentResult`] for the protocol layer to format.

use crate::error::{BridgeError, Result};
use crate::mcp::types::ToolCall;
use crate::registry::{RoutingConfig, ToolBinding};
use crate::routing::substitution::{substitute_headers, substitute_parameter_string};
use crate::routing::types::{AgentResult, AgentType};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

/// Trait for routing tool calls to appropriate agents
#[async_trait]
pub trait AgentRouter: Send + Sync {
    /// Parse routing configuration into agent type
    fn parse_routing_config(&self, routing: &RoutingConfig) -> Result<AgentType>;

    /// Execute tool call with the specified agent
    async fn execute_with_agent(
        &self,
        tool_call: &ToolCall,
        binding: &ToolBinding,
        agent: &AgentType,
    ) -> Result<AgentResult>;

    /// Route a tool call to the appropriate agent (convenience method)
    async fn route(&self, tool_call: &ToolCall, binding: &ToolBinding) -> Result<AgentResult> {
        debug!("Routing tool call: {}", tool_call.name);

        let agent = self.parse_routing_config(&binding.definition.routing)?;
        self.execute_with_agent(tool_call, binding, &agent).await
    }
}

/// Default implementation of AgentRouter
#[derive(Debug, Default)]
pub struct DefaultAgentRouter;

impl DefaultAgentRouter {
    /// Create a new default agent router
    pub fn new() -> Self {
        Self
    }

    /// Execute an HTTP agent: one request, response captured verbatim.
    #[allow(clippy::too_many_arguments)]
    async fn execute_http_agent(
        &self,
        tool_call: &ToolCall,
        method: &str,
        url: &str,
        headers: &Option<HashMap<String, String>>,
        body_param: &Option<String>,
        timeout: Option<u64>,
    ) -> Result<AgentResult> {
        use reqwest::Client;
        use tokio::time::{timeout as tokio_timeout, Duration};

        debug!("Executing HTTP agent: {} {}", method, url);

        let substituted_url = substitute_parameter_string(url, &tool_call.arguments)?;
        let substituted_headers = substitute_headers(headers, &tool_call.arguments)?;

        let timeout_duration = Duration::from_secs(timeout.unwrap_or(30));
        let client = Client::builder()
            .timeout(timeout_duration)
            .build()
            .map_err(|e| BridgeError::routing(format!("Failed to create HTTP client: {}", e)))?;

        let started = std::time::Instant::now();
        let metadata = |url: &str, status: Option<u16>, started: std::time::Instant| {
            json!({
                "tool_name": tool_call.name,
                "execution_type": "http",
                "method": method,
                "url": url,
                "status_code": status,
                "duration_ms": started.elapsed().as_millis() as u64,
                "completed_at": chrono::Utc::now().to_rfc3339(),
            })
        };

        let mut request_builder = match method.to_uppercase().as_str() {
            "GET" => client.get(&substituted_url),
            "POST" => client.post(&substituted_url),
            "PUT" => client.put(&substituted_url),
            "DELETE" => client.delete(&substituted_url),
            "PATCH" => client.patch(&substituted_url),
            _ => {
                return Ok(AgentResult::failure(
                    format!("Unsupported HTTP method: {}", method),
                    metadata(&substituted_url, None, started),
                ))
            }
        };

        if let Some(header_map) = &substituted_headers {
            for (key, value) in header_map {
                request_builder = request_builder.header(key, value);
            }
        }

        // JSON body for mutating requests
        if matches!(method.to_uppercase().as_str(), "POST" | "PUT" | "PATCH") {
            let body = match body_param {
                Some(param) => tool_call
                    .arguments
                    .get(param)
                    .cloned()
                    .unwrap_or(serde_json::Value::Null),
                None => tool_call.arguments.clone(),
            };
            request_builder = request_builder.json(&body);
        }

        let result = tokio_timeout(timeout_duration, request_builder.send()).await;

        match result {
            Ok(Ok(response)) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => {
                        // Keep structured bodies structured for formatting
                        let body_value = serde_json::from_str::<serde_json::Value>(&body)
                            .unwrap_or(serde_json::Value::String(body));
                        let success = status.is_success();
                        let data = json!({
                            "status": status.as_u16(),
                            "body": body_value,
                        });
                        if success {
                            Ok(AgentResult::success(
                                data,
                                metadata(&substituted_url, Some(status.as_u16()), started),
                            ))
                        } else {
                            Ok(AgentResult {
                                success: false,
                                data: Some(data),
                                error: Some(format!(
                                    "HTTP request failed with status: {}",
                                    status
                                )),
                                metadata: Some(metadata(
                                    &substituted_url,
                                    Some(status.as_u16()),
                                    started,
                                )),
                            })
                        }
                    }
                    Err(e) => Ok(AgentResult::failure(
                        format!("Failed to read response body: {}", e),
                        metadata(&substituted_url, Some(status.as_u16()), started),
                    )),
                }
            }
            Ok(Err(e)) => Ok(AgentResult::failure(
                format!("HTTP request failed: {}", e),
                metadata(&substituted_url, None, started),
            )),
            Err(_) => Ok(AgentResult::failure(
                format!(
                    "HTTP request timed out after {} seconds",
                    timeout.unwrap_or(30)
                ),
                metadata(&substituted_url, None, started),
            )),
        }
    }

    /// Execute a Cypher agent: one statement via the graph database's HTTP
    /// transactional commit endpoint.
    async fn execute_cypher_agent(
        &self,
        tool_call: &ToolCall,
        endpoint: &str,
        statement: &str,
        username: &Option<String>,
        password: &Option<String>,
        timeout: Option<u64>,
    ) -> Result<AgentResult> {
        use reqwest::Client;
        use tokio::time::Duration;

        debug!("Executing Cypher agent against {}", endpoint);

        // Labels and relationship types cannot be parameterized in Cypher,
        // so they are substituted into the statement text; everything else
        // travels as statement parameters.
        let substituted_statement =
            substitute_parameter_string(statement, &tool_call.arguments)?;

        let timeout_duration = Duration::from_secs(timeout.unwrap_or(30));
        let client = Client::builder()
            .timeout(timeout_duration)
            .build()
            .map_err(|e| BridgeError::routing(format!("Failed to create HTTP client: {}", e)))?;

        let started = std::time::Instant::now();
        let metadata = |started: std::time::Instant| {
            json!({
                "tool_name": tool_call.name,
                "execution_type": "cypher",
                "endpoint": endpoint,
                "duration_ms": started.elapsed().as_millis() as u64,
                "completed_at": chrono::Utc::now().to_rfc3339(),
            })
        };

        let parameters = if tool_call.arguments.is_object() {
            tool_call.arguments.clone()
        } else {
            json!({})
        };
        let body = json!({
            "statements": [{
                "statement": substituted_statement,
                "parameters": parameters,
            }]
        });

        let mut request_builder = client
            .post(endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&body);

        if let Some(user) = username {
            request_builder = request_builder.basic_auth(user, password.as_deref());
        }

        let response = match request_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                return Ok(AgentResult::failure(
                    format!("Graph database request failed: {}", e),
                    metadata(started),
                ))
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(AgentResult::failure(
                format!("Graph database request failed with status: {}", status),
                metadata(started),
            ));
        }

        let payload: serde_json::Value = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                return Ok(AgentResult::failure(
                    format!("Failed to parse graph database response: {}", e),
                    metadata(started),
                ))
            }
        };

        // The transactional endpoint reports statement failures in-band
        let errors = payload
            .get("errors")
            .and_then(|e| e.as_array())
            .cloned()
            .unwrap_or_default();
        if !errors.is_empty() {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(|m| m.as_str())
                        .unwrap_or("unknown error")
                        .to_string()
                })
                .collect();
            return Ok(AgentResult::failure(messages.join("; "), metadata(started)));
        }

        let results = payload.get("results").cloned().unwrap_or(json!([]));
        Ok(AgentResult::success(
            json!({ "results": results }),
            metadata(started),
        ))
    }

    /// Execute an echo agent: format the resolved binding without invoking
    /// anything. This mirrors the catalog provider's stubbed dispatch.
    fn execute_echo_agent(&self, tool_call: &ToolCall, binding: &ToolBinding) -> AgentResult {
        let text = format!(
            "Tool '{}' resolved to provider action '{}/{}' with arguments: {}",
            tool_call.name, binding.namespace, binding.raw_action, tool_call.arguments
        );
        AgentResult::success(
            json!({ "echo": text }),
            json!({
                "tool_name": tool_call.name,
                "execution_type": "echo",
                "namespace": binding.namespace,
                "raw_action": binding.raw_action,
            }),
        )
    }
}

#[async_trait]
impl AgentRouter for DefaultAgentRouter {
    fn parse_routing_config(&self, routing: &RoutingConfig) -> Result<AgentType> {
        let config = &routing.config;
        match routing.r#type.as_str() {
            "http" => Ok(AgentType::Http {
                method: config
                    .get("method")
                    .and_then(|v| v.as_str())
                    .unwrap_or("GET")
                    .to_string(),
                url: config
                    .get("url")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| BridgeError::routing("HTTP routing config missing 'url'"))?
                    .to_string(),
                headers: config.get("headers").and_then(|v| v.as_object()).map(|obj| {
                    obj.iter()
                        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                        .collect()
                }),
                body_param: config
                    .get("body_param")
                    .and_then(|v| v.as_str())
                    .map(String::from),
                timeout: config.get("timeout").and_then(|v| v.as_u64()),
            }),
            "cypher" => Ok(AgentType::Cypher {
                endpoint: config
                    .get("endpoint")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        BridgeError::routing("Cypher routing config missing 'endpoint'")
                    })?
                    .to_string(),
                statement: config
                    .get("statement")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        BridgeError::routing("Cypher routing config missing 'statement'")
                    })?
                    .to_string(),
                username: config
                    .get("username")
                    .and_then(|v| v.as_str())
                    .map(String::from),
                password: config
                    .get("password")
                    .and_then(|v| v.as_str())
                    .map(String::from),
                timeout: config.get("timeout").and_then(|v| v.as_u64()),
            }),
            "echo" => Ok(AgentType::Echo),
            other => Err(BridgeError::routing(format!(
                "Unsupported routing type: {}",
                other
            ))),
        }
    }

    async fn execute_with_agent(
        &self,
        tool_call: &ToolCall,
        binding: &ToolBinding,
        agent: &AgentType,
    ) -> Result<AgentResult> {
        match agent {
            AgentType::Http {
                method,
                url,
                headers,
                body_param,
                timeout,
            } => {
                self.execute_http_agent(tool_call, method, url, headers, body_param, *timeout)
                    .await
            }
            AgentType::Cypher {
                endpoint,
                statement,
                username,
                password,
                timeout,
            } => {
                self.execute_cypher_agent(
                    tool_call, endpoint, statement, username, password, *timeout,
                )
                .await
            }
            AgentType::Echo => Ok(self.execute_echo_agent(tool_call, binding)),
        }
    }
}
