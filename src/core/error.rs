//! Typed error handling for the order store
//!
//! Every store operation returns [`BakeryError`], which wraps one of the
//! more specific categories below so callers can match on what went wrong
//! instead of inspecting message strings.
//!
//! # Error Categories
//!
//! - [`StorageError`]: the storage medium could not be opened, a statement
//!   failed, or a stored row could not be decoded
//! - [`ValidationError`]: input rejected at the store boundary or by the
//!   optional caller-side checks
//! - [`ConfigError`]: the configuration asks for something this build
//!   cannot provide
//!
//! Updating or deleting an order id that does not exist is not an error.
//!
//! # Example
//!
//! ```rust,ignore
//! match store.create(order).await {
//!     Ok(id) => println!("Order {} registered", id),
//!     Err(BakeryError::Storage(StorageError::Connection { path, .. })) => {
//!         eprintln!("cannot open {}", path);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::Serialize;

/// Result alias used by every store operation
pub type Result<T, E = BakeryError> = std::result::Result<T, E>;

/// The main error type of the crate
#[derive(Debug, thiserror::Error)]
pub enum BakeryError {
    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BakeryError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BakeryError::Storage(e) => e.error_code(),
            BakeryError::Validation(_) => "VALIDATION_ERROR",
            BakeryError::Config(_) => "CONFIG_ERROR",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage file could not be opened or created
    #[error("Failed to open order database '{path}': {message}")]
    Connection { path: String, message: String },

    /// A statement failed, including constraint violations on write
    #[error("Failed to {operation} order: {message}")]
    Query {
        operation: &'static str,
        message: String,
    },

    /// A stored row does not describe a valid order
    #[error("Data integrity error: {message}")]
    Integrity { message: String },

    /// The database was written by a newer schema than this build knows
    #[error("Database schema version {found} is newer than supported version {supported}")]
    SchemaVersion { found: i64, supported: i64 },

    /// Backend not usable (poisoned lock, closed handle)
    #[error("Storage backend '{backend}' is unavailable: {message}")]
    Unavailable {
        backend: &'static str,
        message: String,
    },
}

impl StorageError {
    pub fn query(operation: &'static str, err: impl std::fmt::Display) -> Self {
        StorageError::Query {
            operation,
            message: err.to_string(),
        }
    }

    pub fn integrity(message: impl Into<String>) -> Self {
        StorageError::Integrity {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Connection { .. } => "STORAGE_CONNECTION_FAILED",
            StorageError::Query { .. } => "STORAGE_QUERY_FAILED",
            StorageError::Integrity { .. } => "STORAGE_INTEGRITY_ERROR",
            StorageError::SchemaVersion { .. } => "STORAGE_SCHEMA_UNSUPPORTED",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Text that is not one of the allowed choices of an enumerated field
    #[error("Invalid value '{value}' for field '{field}': expected one of {expected}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: &'static str, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: &'static str,
    pub message: String,
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Fields named by this error, in the order they were reported
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            ValidationError::InvalidChoice { field, .. }
            | ValidationError::FieldError { field, .. } => vec![*field],
            ValidationError::FieldErrors(errors) => errors.iter().map(|e| e.field).collect(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured backend was not compiled into this build
    #[error("Storage backend '{backend}' is not enabled in this build")]
    UnsupportedBackend { backend: String },
}
