//! Parameter substitution for routing configurations

use crate::error::{BridgeError, Result};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Substitute parameters in a single string.
///
/// Handles both `{{parameter}}` and `{parameter}` syntax. Placeholders with
/// no matching argument are left in place; schema defaults are applied
/// before dispatch, so a leftover placeholder means an optional parameter
/// the caller chose to omit.
pub fn substitute_parameter_string(template: &str, parameters: &Value) -> Result<String> {
    let mut result = template.to_string();

    if let Some(obj) = parameters.as_object() {
        for (key, value) in obj {
            let double_placeholder = format!("{{{{{}}}}}", key);
            let single_placeholder = format!("{{{}}}", key);

            let replacement = value_to_string(value)?;

            result = result.replace(&double_placeholder, &replacement);
            result = result.replace(&single_placeholder, &replacement);
        }
    }

    debug!("Parameter substitution: '{}' -> '{}'", template, result);
    Ok(result)
}

/// Substitute parameters in HTTP headers
pub fn substitute_headers(
    headers: &Option<HashMap<String, String>>,
    parameters: &Value,
) -> Result<Option<HashMap<String, String>>> {
    match headers {
        Some(header_map) => {
            let mut substituted_headers = HashMap::new();

            for (key, value) in header_map {
                let substituted_value = substitute_parameter_string(value, parameters)?;
                substituted_headers.insert(key.clone(), substituted_value);
            }

            Ok(Some(substituted_headers))
        }
        None => Ok(None),
    }
}

/// Convert a JSON value to a string for parameter substitution
fn value_to_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).map_err(|e| {
            BridgeError::validation(format!("Failed to serialize parameter value: {}", e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_parameter_substitution() {
        let template = "https://api.example.com/read/{table}";
        let params = json!({"table": "customer"});

        let result = substitute_parameter_string(template, &params).unwrap();
        assert_eq!(result, "https://api.example.com/read/customer");
    }

    #[test]
    fn test_double_brace_substitution() {
        let template = "MATCH (n:{{label}}) RETURN n";
        let params = json!({"label": "Project"});

        let result = substitute_parameter_string(template, &params).unwrap();
        assert_eq!(result, "MATCH (n:Project) RETURN n");
    }

    #[test]
    fn test_multiple_parameters() {
        let template = "{base}/read/{table}?limit={limit}";
        let params = json!({
            "base": "https://api.example.com",
            "table": "customer",
            "limit": 25
        });

        let result = substitute_parameter_string(template, &params).unwrap();
        assert_eq!(result, "https://api.example.com/read/customer?limit=25");
    }

    #[test]
    fn test_unmatched_placeholder_left_in_place() {
        let template = "{base}/read/{table}";
        let params = json!({"base": "https://api.example.com"});

        let result = substitute_parameter_string(template, &params).unwrap();
        assert_eq!(result, "https://api.example.com/read/{table}");
    }

    #[test]
    fn test_header_substitution() {
        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            "Bearer {api_key}".to_string(),
        );
        let params = json!({"api_key": "secret123"});

        let result = substitute_headers(&Some(headers), &params).unwrap().unwrap();
        assert_eq!(result["Authorization"], "Bearer secret123");
    }
}
