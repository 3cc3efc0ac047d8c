//! The order record and its closed enumerations

use crate::core::error::ValidationError;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places kept for prices
pub const PRICE_SCALE: u32 = 2;

/// System-assigned order number
///
/// Ids are handed out by the store in increasing order and never reused,
/// even after the order carrying the highest id is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl OrderId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        OrderId(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declares a closed enumeration stored by its display text.
///
/// Generates `ALL`, `as_str`, `Display`, `FromStr` (exact match only) and
/// serde impls that use the same text.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant, in presentation order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Text used in storage and on the wire
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ValidationError::InvalidChoice {
                        field: $field,
                        value: other.to_string(),
                        expected: [$($text),+].join(", "),
                    }),
                }
            }
        }
    };
}

text_enum! {
    /// Kind of cake an order asks for
    CakeType, "cake_type" {
        Chocolate => "Chocolate",
        Vanilla => "Vanilla",
        RedVelvet => "Red Velvet",
        Carrot => "Carrot",
        /// Anything off the menu; details go in the notes
        Other => "Other",
    }
}

text_enum! {
    /// Where an order stands
    ///
    /// Transitions are unconstrained: an update may move any status to any
    /// other, including back to `InProgress`.
    OrderStatus, "status" {
        InProgress => "InProgress",
        Delivered => "Delivered",
        Cancelled => "Cancelled",
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::InProgress
    }
}

/// A stored cake order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub cake_type: CakeType,
    pub quantity: i64,
    pub price: Decimal,
    pub delivery_date: NaiveDate,
    pub notes: Option<String>,
    pub status: OrderStatus,
}

impl Order {
    /// Build the record `create` stores for `order` under `id`
    pub fn from_new(id: OrderId, order: NewOrder) -> Self {
        Self {
            id,
            customer_name: order.customer_name,
            cake_type: order.cake_type,
            quantity: order.quantity,
            price: normalize_price(order.price),
            delivery_date: order.delivery_date,
            notes: order.notes,
            status: OrderStatus::InProgress,
        }
    }

    /// Overwrite every mutable field with the values of `update`
    pub fn apply(&mut self, update: OrderUpdate) {
        self.customer_name = update.customer_name;
        self.cake_type = update.cake_type;
        self.quantity = update.quantity;
        self.price = normalize_price(update.price);
        self.delivery_date = update.delivery_date;
        self.notes = update.notes;
        self.status = update.status;
    }

    /// The update that would leave this order unchanged
    ///
    /// Edit forms start from this and replace the fields the user touched.
    pub fn to_update(&self) -> OrderUpdate {
        OrderUpdate {
            customer_name: self.customer_name.clone(),
            cake_type: self.cake_type,
            quantity: self.quantity,
            price: self.price,
            delivery_date: self.delivery_date,
            notes: self.notes.clone(),
            status: self.status,
        }
    }
}

/// Field values for a new order
///
/// There is no status field: new orders always start `InProgress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub cake_type: CakeType,
    pub quantity: i64,
    pub price: Decimal,
    pub delivery_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewOrder {
    pub fn new(
        customer_name: impl Into<String>,
        cake_type: CakeType,
        quantity: i64,
        price: Decimal,
        delivery_date: NaiveDate,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            cake_type,
            quantity,
            price,
            delivery_date,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Replacement values for every mutable field of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub customer_name: String,
    pub cake_type: CakeType,
    pub quantity: i64,
    pub price: Decimal,
    pub delivery_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: OrderStatus,
}

/// Round a price to [`PRICE_SCALE`] places, midpoints away from zero.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut rounded =
        price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);
    rounded
}

/// Price in cents, the unit the SQLite backend persists.
pub fn price_to_cents(price: Decimal) -> Result<i64, ValidationError> {
    normalize_price(price)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| ValidationError::FieldError {
            field: "price",
            message: format!("{} is out of the storable range", price),
        })
}

pub fn price_from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, PRICE_SCALE)
}
