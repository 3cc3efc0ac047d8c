//! Order report: every row plus per-status totals

use crate::core::order::{Order, OrderStatus, PRICE_SCALE};
use rust_decimal::Decimal;
use serde::Serialize;

/// Totals for the orders sharing one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub status: OrderStatus,
    /// Number of orders
    pub orders: usize,
    /// Number of cakes across those orders
    pub cakes: i64,
    /// Sum of prices; saturates at the `Decimal` bounds like `cakes` does at `i64`'s
    pub total_price: Decimal,
}

impl StatusSummary {
    fn empty(status: OrderStatus) -> Self {
        Self {
            status,
            orders: 0,
            cakes: 0,
            total_price: Decimal::new(0, PRICE_SCALE),
        }
    }
}

/// Snapshot of the order book as the report page shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReport {
    /// All orders, in list order
    pub rows: Vec<Order>,
    /// One entry per status, in [`OrderStatus::ALL`] order
    pub by_status: Vec<StatusSummary>,
    /// Price total of every order that is not cancelled
    pub booked_total: Decimal,
}

impl OrderReport {
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let mut by_status: Vec<StatusSummary> = OrderStatus::ALL
            .iter()
            .map(|status| StatusSummary::empty(*status))
            .collect();

        for order in &orders {
            if let Some(summary) = by_status.iter_mut().find(|s| s.status == order.status) {
                summary.orders += 1;
                summary.cakes = summary.cakes.saturating_add(order.quantity);
                summary.total_price = summary.total_price.saturating_add(order.price);
            }
        }

        let booked_total = by_status
            .iter()
            .filter(|s| s.status != OrderStatus::Cancelled)
            .fold(Decimal::new(0, PRICE_SCALE), |acc, s| {
                acc.saturating_add(s.total_price)
            });

        Self {
            rows: orders,
            by_status,
            booked_total,
        }
    }

    pub fn summary(&self, status: OrderStatus) -> Option<&StatusSummary> {
        self.by_status.iter().find(|s| s.status == status)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
