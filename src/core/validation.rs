//! Caller-side validation of order input
//!
//! The store accepts whatever it is given. These checks are what the order
//! forms enforce through their widgets (minimum quantity, non-negative
//! price, no delivery in the past), available to any UI shell that wants
//! the same guarantees before calling the store.

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::order::{NewOrder, OrderUpdate};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Validator: text must contain something other than whitespace
pub fn required_text(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(())
    }
}

/// Validator: quantity must be at least one cake
pub fn min_quantity(value: i64) -> Result<(), String> {
    if value < 1 {
        Err(format!("must be at least 1 (got {})", value))
    } else {
        Ok(())
    }
}

/// Validator: price must not be negative
pub fn non_negative(value: Decimal) -> Result<(), String> {
    if value < Decimal::ZERO {
        Err(format!("must not be negative (got {})", value))
    } else {
        Ok(())
    }
}

/// Validator: date must not be earlier than `earliest`
pub fn not_before(value: NaiveDate, earliest: NaiveDate) -> Result<(), String> {
    if value < earliest {
        Err(format!("must be on or after {} (got {})", earliest, value))
    } else {
        Ok(())
    }
}

/// Accumulates per-field failures so the caller sees all of them at once
#[derive(Debug, Default)]
struct Checker {
    errors: Vec<FieldValidationError>,
}

impl Checker {
    fn check(&mut self, field: &'static str, outcome: Result<(), String>) -> &mut Self {
        if let Err(message) = outcome {
            self.errors.push(FieldValidationError { field, message });
        }
        self
    }

    fn finish(&mut self) -> Result<(), ValidationError> {
        match self.errors.len() {
            0 => Ok(()),
            1 => {
                let FieldValidationError { field, message } = self.errors.remove(0);
                Err(ValidationError::FieldError { field, message })
            }
            _ => Err(ValidationError::FieldErrors(std::mem::take(&mut self.errors))),
        }
    }
}

impl NewOrder {
    /// Check the fields the order form restricts.
    ///
    /// `today` is the creation date; deliveries before it are rejected.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        Checker::default()
            .check("customer_name", required_text(&self.customer_name))
            .check("quantity", min_quantity(self.quantity))
            .check("price", non_negative(self.price))
            .check("delivery_date", not_before(self.delivery_date, today))
            .finish()
    }
}

impl OrderUpdate {
    /// Same checks as [`NewOrder::validate`] except the delivery date,
    /// which an edit may leave in the past.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Checker::default()
            .check("customer_name", required_text(&self.customer_name))
            .check("quantity", min_quantity(self.quantity))
            .check("price", non_negative(self.price))
            .finish()
    }
}
