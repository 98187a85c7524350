//! Configuration module

mod config;

pub use config::{
    CatalogConfig, Config, GraphConfig, LoggingConfig, NamingConfig, RecordsConfig, ServerConfig,
};
