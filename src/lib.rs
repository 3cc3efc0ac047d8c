//! # Bakery Orders
//!
//! Order storage for a home bakery: cake orders are recorded, listed,
//! edited, deleted and reported on, backed by a single SQLite table.
//!
//! ## Features
//!
//! - **Typed orders**: closed enumerations for cake type and status, exact
//!   two-decimal prices, calendar delivery dates
//! - **Pluggable storage**: `SqliteOrderStore` for durable use,
//!   `InMemoryOrderStore` for tests, both behind the `OrderStore` trait
//! - **Idempotent initialization**: safe on every start, schema versioned
//! - **Caller-side validation**: the checks an order form applies, on demand
//! - **Reporting**: every order plus per-status totals
//!
//! The presentation layer is not part of this crate; a UI shell collects
//! input, calls one store operation and renders the result.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bakery::prelude::*;
//!
//! let config = BakeryConfig::from_yaml_file("bakery.yaml")?.with_env_overrides();
//! init_tracing(&config.logging)?;
//!
//! let store = open_store(&config.storage)?;
//! store.initialize().await?;
//!
//! let id = store
//!     .create(
//!         NewOrder::new("Ana", CakeType::Chocolate, 2, dec!(45.00), delivery)
//!             .with_notes("sem açúcar"),
//!     )
//!     .await?;
//!
//! let mut update = store.get(id).await?.unwrap().to_update();
//! update.status = OrderStatus::Delivered;
//! store.update(id, update).await?;
//! ```

pub mod config;
pub mod core;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BakeryError, CakeType, NewOrder, Order, OrderId, OrderReport, OrderStatus, OrderStore,
        OrderUpdate, StatusSummary, StorageError, ValidationError,
    };

    // === Storage ===
    pub use crate::storage::open_store;
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryOrderStore;
    #[cfg(feature = "sqlite")]
    pub use crate::storage::SqliteOrderStore;

    // === Config & logging ===
    pub use crate::config::{BakeryConfig, LoggingConfig, StorageBackend, StorageConfig};
    pub use crate::telemetry::init_tracing;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use rust_decimal::Decimal;
}
