//! In-memory implementation of OrderStore for testing and development

use crate::core::error::{Result, StorageError};
use crate::core::order::{NewOrder, Order, OrderId, OrderUpdate, price_to_cents};
use crate::core::OrderStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

const BACKEND: &str = "in_memory";

#[derive(Debug)]
struct State {
    /// Last id handed out; never decreases, so ids are not reused
    last_id: i64,
    orders: BTreeMap<OrderId, Order>,
}

/// In-memory order store implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same orders.
#[derive(Clone, Debug)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryOrderStore {
    /// Create a new, empty in-memory order store
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                last_id: 0,
                orders: BTreeMap::new(),
            })),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        self.state.read().map_err(|e| {
            StorageError::Unavailable {
                backend: BACKEND,
                message: format!("Failed to acquire read lock: {}", e),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        self.state.write().map_err(|e| {
            StorageError::Unavailable {
                backend: BACKEND,
                message: format!("Failed to acquire write lock: {}", e),
            }
            .into()
        })
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn initialize(&self) -> Result<()> {
        // Nothing to create; surfaces a poisoned lock early
        self.read().map(|_| ())
    }

    async fn create(&self, order: NewOrder) -> Result<OrderId> {
        // Same price range the SQLite backend can persist
        price_to_cents(order.price)?;
        let mut state = self.write()?;

        state.last_id += 1;
        let id = OrderId(state.last_id);
        state.orders.insert(id, Order::from_new(id, order));

        tracing::debug!(order_id = %id, "Order created");
        Ok(id)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>> {
        let state = self.read()?;

        Ok(state.orders.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Order>> {
        let state = self.read()?;

        Ok(state.orders.values().cloned().collect())
    }

    async fn update(&self, id: OrderId, update: OrderUpdate) -> Result<bool> {
        price_to_cents(update.price)?;
        let mut state = self.write()?;

        let Some(order) = state.orders.get_mut(&id) else {
            tracing::debug!(order_id = %id, "Update matched no order");
            return Ok(false);
        };
        order.apply(update);

        tracing::debug!(order_id = %id, status = %order.status, "Order updated");
        Ok(true)
    }

    async fn delete(&self, id: OrderId) -> Result<bool> {
        let mut state = self.write()?;

        let removed = state.orders.remove(&id).is_some();
        if removed {
            tracing::debug!(order_id = %id, "Order deleted");
        } else {
            tracing::debug!(order_id = %id, "Delete matched no order");
        }
        Ok(removed)
    }
}
