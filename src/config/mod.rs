//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that replaces `storage.path`
pub const ENV_DB_PATH: &str = "BAKERY_DB_PATH";

/// Environment variable that replaces `logging.filter`
pub const ENV_LOG_FILTER: &str = "BAKERY_LOG";

/// Which [`OrderStore`](crate::core::OrderStore) implementation to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One SQLite file at `storage.path`
    #[default]
    Sqlite,
    /// Process-local, lost on exit
    InMemory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::InMemory => "in_memory",
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Location of the database file
    pub path: PathBuf,

    /// How long a write waits on another process holding the file lock
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            path: PathBuf::from("bakery_orders.db"),
            busy_timeout_ms: 5_000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `bakery=debug`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Complete configuration of the order store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeryConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl BakeryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply `BAKERY_DB_PATH` and `BAKERY_LOG` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up through `lookup`
    ///
    /// Empty values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|v| !v.is_empty()) {
            self.storage.path = PathBuf::from(path);
        }
        if let Some(filter) = lookup(ENV_LOG_FILTER).filter(|v| !v.is_empty()) {
            self.logging.filter = filter;
        }
        self
    }
}
