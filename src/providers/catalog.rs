//! Vendor action catalog provider
//!
//! A curated set of common vendor actions, declared under their verbose
//! vendor identifiers. Dispatch for catalog tools is the echo agent: the
//! vendor platform's execution API is not wired up, so a call reports the
//! resolved provider action instead of invoking it.

use crate::config::CatalogConfig;
use crate::error::{BridgeError, Result};
use crate::registry::{ParamMap, ParamSpec, Registry, RoutingConfig, ToolSpec};
use serde_json::json;

/// Register the configured catalog apps.
pub fn register(registry: &mut Registry, config: &CatalogConfig) -> Result<usize> {
    if !config.enabled {
        return Ok(0);
    }

    let mut count = 0;
    for app in &config.apps {
        let specs = match app.as_str() {
            "github" => github_actions(),
            "gmail" => gmail_actions(),
            "slack" => slack_actions(),
            "google-drive" => google_drive_actions(),
            "notion" => notion_actions(),
            other => {
                return Err(BridgeError::config(format!(
                    "Unknown catalog app: {}",
                    other
                )))
            }
        };
        count += registry.register_all(app, specs)?;
    }
    Ok(count)
}

fn echo() -> RoutingConfig {
    RoutingConfig::new("echo", json!({}))
}

fn github_actions() -> Vec<ToolSpec> {
    let mut issue_params = ParamMap::new();
    issue_params.insert(
        "repo".to_string(),
        ParamSpec::string("Repository name (owner/repo)"),
    );
    issue_params.insert("title".to_string(), ParamSpec::string("Issue title"));
    issue_params.insert(
        "body".to_string(),
        ParamSpec::string("Issue description").optional(),
    );

    let mut repo_params = ParamMap::new();
    repo_params.insert(
        "limit".to_string(),
        ParamSpec::integer_with_default("Number of repositories to return", 10),
    );

    let mut pr_params = ParamMap::new();
    pr_params.insert(
        "repo".to_string(),
        ParamSpec::string("Repository name (owner/repo)"),
    );
    pr_params.insert("number".to_string(), ParamSpec::integer("Pull request number"));

    vec![
        ToolSpec::new(
            "GITHUB_CREATE_ISSUE",
            "Create a new issue in a GitHub repository",
            issue_params,
            echo(),
        ),
        ToolSpec::new(
            "GITHUB_LIST_REPOSITORIES",
            "List repositories for the authenticated user",
            repo_params,
            echo(),
        ),
        ToolSpec::new(
            "GITHUB_GET_PULL_REQUEST",
            "Fetch a pull request by number",
            pr_params,
            echo(),
        ),
    ]
}

fn gmail_actions() -> Vec<ToolSpec> {
    let mut send_params = ParamMap::new();
    send_params.insert("to".to_string(), ParamSpec::string("Recipient email"));
    send_params.insert("subject".to_string(), ParamSpec::string("Email subject"));
    send_params.insert("body".to_string(), ParamSpec::string("Email body"));

    let mut list_params = ParamMap::new();
    list_params.insert(
        "limit".to_string(),
        ParamSpec::integer_with_default("Number of emails to return", 10),
    );

    vec![
        ToolSpec::new("GMAIL_SEND_EMAIL", "Send an email via Gmail", send_params, echo()),
        ToolSpec::new(
            "GMAIL_FETCH_EMAILS",
            "List emails from the Gmail inbox",
            list_params,
            echo(),
        ),
    ]
}

fn slack_actions() -> Vec<ToolSpec> {
    let mut message_params = ParamMap::new();
    message_params.insert(
        "channel".to_string(),
        ParamSpec::string("Channel name or ID"),
    );
    message_params.insert("message".to_string(), ParamSpec::string("Message text"));

    vec![
        ToolSpec::new(
            "SLACK_SEND_MESSAGE",
            "Send a message to a Slack channel",
            message_params,
            echo(),
        ),
        ToolSpec::new(
            "SLACK_LIST_ALL_CHANNELS",
            "List Slack channels",
            ParamMap::new(),
            echo(),
        ),
    ]
}

fn google_drive_actions() -> Vec<ToolSpec> {
    let mut upload_params = ParamMap::new();
    upload_params.insert("file_path".to_string(), ParamSpec::string("Local file path"));
    upload_params.insert(
        "folder".to_string(),
        ParamSpec::string("Destination folder").optional(),
    );

    let mut list_params = ParamMap::new();
    list_params.insert(
        "limit".to_string(),
        ParamSpec::integer_with_default("Number of files to return", 10),
    );

    vec![
        ToolSpec::new(
            "GOOGLE-DRIVE_UPLOAD_FILE",
            "Upload a file to Google Drive",
            upload_params,
            echo(),
        ),
        ToolSpec::new(
            "GOOGLE-DRIVE_LIST_FILES",
            "List files in Google Drive",
            list_params,
            echo(),
        ),
    ]
}

fn notion_actions() -> Vec<ToolSpec> {
    let mut page_params = ParamMap::new();
    page_params.insert("title".to_string(), ParamSpec::string("Page title"));
    page_params.insert(
        "content".to_string(),
        ParamSpec::string("Page content").optional(),
    );

    vec![ToolSpec::new(
        "NOTION_CREATE_PAGE",
        "Create a new Notion page",
        page_params,
        echo(),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_default_catalog() {
        let mut registry = Registry::new();
        let config = CatalogConfig::default();
        let count = register(&mut registry, &config).unwrap();
        assert_eq!(count, registry.len());

        // Verbose vendor identifiers come out canonicalized.
        assert!(registry.lookup("github_issue").is_some());
        assert!(registry.lookup("gmail_email").is_some());
        assert!(registry.lookup("slack_message").is_some());
        assert!(registry.lookup("google_drive_files").is_some());
        assert!(registry.lookup("notion_page").is_some());
    }

    #[test]
    fn test_disabled_catalog_registers_nothing() {
        let mut registry = Registry::new();
        let config = CatalogConfig {
            enabled: false,
            ..CatalogConfig::default()
        };
        assert_eq!(register(&mut registry, &config).unwrap(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_app_rejected() {
        let mut registry = Registry::new();
        let config = CatalogConfig {
            enabled: true,
            apps: vec!["fax-machine".to_string()],
        };
        assert!(register(&mut registry, &config).is_err());
    }
}
