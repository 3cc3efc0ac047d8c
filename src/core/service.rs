//! Service trait for order persistence

use crate::core::error::Result;
use crate::core::order::{NewOrder, Order, OrderId, OrderUpdate};
use crate::core::report::OrderReport;
use async_trait::async_trait;

/// Durable CRUD over the order collection
///
/// Implementations are the single source of truth for orders; nothing is
/// cached above them. Each call touches at most one record and is atomic
/// with respect to it. The trait is object-safe so UI shells can hold an
/// `Arc<dyn OrderStore>` chosen from configuration.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Make sure the backing collection exists
    ///
    /// Idempotent and safe to call on every process start: creates the
    /// storage when absent and leaves existing orders untouched.
    async fn initialize(&self) -> Result<()>;

    /// Insert a new order and return its id
    ///
    /// The order starts `InProgress`. Field content is not validated here;
    /// see [`NewOrder::validate`] for the checks a form applies.
    async fn create(&self, order: NewOrder) -> Result<OrderId>;

    /// Get an order by id
    async fn get(&self, id: OrderId) -> Result<Option<Order>>;

    /// List every order, by ascending id
    async fn list_all(&self) -> Result<Vec<Order>>;

    /// Overwrite every mutable field of the order with `id`
    ///
    /// Returns `false` when no such order exists; that is not an error.
    async fn update(&self, id: OrderId, update: OrderUpdate) -> Result<bool>;

    /// Permanently remove the order with `id`
    ///
    /// Returns `false` when no such order exists; that is not an error.
    async fn delete(&self, id: OrderId) -> Result<bool>;

    /// Build the order report from the current contents
    async fn report(&self) -> Result<OrderReport> {
        Ok(OrderReport::from_orders(self.list_all().await?))
    }
}
