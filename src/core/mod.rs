//! Core module containing the order model, the store trait and errors

pub mod error;
pub mod order;
pub mod report;
pub mod service;
pub mod validation;

pub use error::{BakeryError, ConfigError, StorageError, ValidationError};
pub use order::{CakeType, NewOrder, Order, OrderId, OrderStatus, OrderUpdate};
pub use report::{OrderReport, StatusSummary};
pub use service::OrderStore;
