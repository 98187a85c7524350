//! Configuration management for toolbridge
//!
//! Configuration is supplied externally: a YAML file with `${VAR}`
//! environment expansion, plus a small set of `TOOLBRIDGE_*` overrides for
//! secrets. Nothing is hardcoded in the binary.

use crate::error::{BridgeError, Result};
use crate::naming::{NameCanonicalizer, NamingPolicy};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

// Default functions for serde
fn default_server_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_server_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

fn default_catalog_apps() -> Vec<String> {
    vec![
        "github".to_string(),
        "gmail".to_string(),
        "slack".to_string(),
        "google-drive".to_string(),
        "notion".to_string(),
    ]
}

fn default_records_namespace() -> String {
    "nocodebackend".to_string()
}

fn default_graph_namespace() -> String {
    "neo4j".to_string()
}

fn default_graph_database() -> String {
    "neo4j".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server identity
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Naming policy overrides
    pub naming: Option<NamingConfig>,
    /// Vendor action catalog provider
    pub catalog: Option<CatalogConfig>,
    /// Records backend provider
    pub records: Option<RecordsConfig>,
    /// Graph store provider
    pub graph: Option<GraphConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            naming: None,
            catalog: Some(CatalogConfig::default()),
            records: None,
            graph: None,
        }
    }
}

/// Server identity advertised during the MCP handshake
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_name")]
    pub name: String,
    #[serde(default = "default_server_version")]
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            version: default_server_version(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("text" or "json")
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Naming policy overrides
#[derive(Debug, Clone, Deserialize)]
pub struct NamingConfig {
    /// Replacement noise-prefix list, in match order
    pub noise_prefixes: Option<Vec<String>>,
    /// Maximum canonical name length
    pub max_length: Option<usize>,
}

impl NamingConfig {
    /// Build the canonicalizer described by this section.
    pub fn to_canonicalizer(&self) -> NameCanonicalizer {
        let defaults = NamingPolicy::default();
        NameCanonicalizer::with_policy(NamingPolicy {
            noise_prefixes: self
                .noise_prefixes
                .clone()
                .unwrap_or(defaults.noise_prefixes),
            max_length: self.max_length.unwrap_or(defaults.max_length),
        })
    }

    fn validate(&self) -> Result<()> {
        if let Some(max_length) = self.max_length {
            if max_length == 0 {
                return Err(BridgeError::config("naming.max_length must be positive"));
            }
        }
        if let Some(prefixes) = &self.noise_prefixes {
            for prefix in prefixes {
                if !prefix.ends_with('_') {
                    return Err(BridgeError::config(format!(
                        "Noise prefix '{}' must end with '_'",
                        prefix
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Vendor action catalog provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Apps to expose; unknown names are rejected at registration
    #[serde(default = "default_catalog_apps")]
    pub apps: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            apps: default_catalog_apps(),
        }
    }
}

/// Records backend provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsConfig {
    #[serde(default = "default_records_namespace")]
    pub namespace: String,
    /// API base URL, e.g. `https://api.nocodebackend.com`
    pub base_url: String,
    /// Backend instance identifier
    pub instance: String,
    /// Bearer token
    pub api_key: SecretString,
    /// Tables to expose CRUD tools for
    pub tables: Vec<String>,
    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Graph store provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_graph_namespace")]
    pub namespace: String,
    /// HTTP API base URL, e.g. `http://localhost:7474`
    pub uri: String,
    #[serde(default = "default_graph_database")]
    pub database: String,
    pub username: String,
    pub password: SecretString,
    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// `${VAR}` references in the file are expanded from the environment
    /// before parsing. A missing file yields the default configuration
    /// (catalog provider only).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "Configuration file '{}' not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::config(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        let expanded = shellexpand::env(&raw).map_err(|e| {
            BridgeError::config(format!(
                "Environment expansion failed in '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config: Config = serde_yaml::from_str(&expanded)?;
        config.apply_env_overrides();
        config.validate()?;

        debug!("Loaded configuration from '{}'", path.display());
        Ok(config)
    }

    /// Apply `TOOLBRIDGE_*` environment overrides on top of the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("TOOLBRIDGE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(records) = &mut self.records {
            if let Ok(key) = std::env::var("TOOLBRIDGE_RECORDS_API_KEY") {
                records.api_key = SecretString::new(key);
            }
        }
        if let Some(graph) = &mut self.graph {
            if let Ok(password) = std::env::var("TOOLBRIDGE_GRAPH_PASSWORD") {
                graph.password = SecretString::new(password);
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(BridgeError::config("server.name cannot be empty"));
        }

        if let Some(naming) = &self.naming {
            naming.validate()?;
        }

        if let Some(records) = &self.records {
            url::Url::parse(&records.base_url).map_err(|e| {
                BridgeError::config(format!(
                    "records.base_url '{}' is not a valid URL: {}",
                    records.base_url, e
                ))
            })?;
            if records.instance.trim().is_empty() {
                return Err(BridgeError::config("records.instance cannot be empty"));
            }
            if records.tables.is_empty() {
                return Err(BridgeError::config("records.tables cannot be empty"));
            }
            if records.tables.iter().any(|t| t.trim().is_empty()) {
                return Err(BridgeError::config("records.tables entries cannot be empty"));
            }
        }

        if let Some(graph) = &self.graph {
            url::Url::parse(&graph.uri).map_err(|e| {
                BridgeError::config(format!(
                    "graph.uri '{}' is not a valid URL: {}",
                    graph.uri, e
                ))
            })?;
            if graph.database.trim().is_empty() {
                return Err(BridgeError::config("graph.database cannot be empty"));
            }
            if graph.username.trim().is_empty() {
                return Err(BridgeError::config("graph.username cannot be empty"));
            }
        }

        Ok(())
    }

    /// Build the shared canonicalizer for this configuration.
    pub fn canonicalizer(&self) -> NameCanonicalizer {
        self.naming
            .as_ref()
            .map(|n| n.to_canonicalizer())
            .unwrap_or_default()
    }
}
