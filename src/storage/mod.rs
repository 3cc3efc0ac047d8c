//! Storage implementations for different backends

#[cfg(feature = "in-memory")]
pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryOrderStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteOrderStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::OrderStore;
use crate::core::error::{ConfigError, Result};
use std::sync::Arc;

/// Build the backend named by `config`
///
/// The store is not initialized; call [`OrderStore::initialize`] once at
/// startup.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn OrderStore>> {
    tracing::debug!(backend = config.backend.as_str(), "Opening order store");

    match config.backend {
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => Ok(Arc::new(SqliteOrderStore::from_config(config))),
        #[cfg(feature = "in-memory")]
        StorageBackend::InMemory => Ok(Arc::new(InMemoryOrderStore::new())),
        #[allow(unreachable_patterns)]
        other => Err(ConfigError::UnsupportedBackend {
            backend: other.as_str().to_string(),
        }
        .into()),
    }
}
