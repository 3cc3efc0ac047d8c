//! SQLite storage backend using sqlx.
//!
//! Provides `SqliteOrderStore`, the durable [`OrderStore`] backed by a single
//! SQLite file.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag (on by default).
//!
//! # Schema
//!
//! Orders live in one `orders` table. `id` is an `AUTOINCREMENT` primary key
//! so ids are never reused, prices are stored as integer cents, and delivery
//! dates as ISO-8601 text. The schema version is kept in
//! `PRAGMA user_version`.
//!
//! # Connections
//!
//! Every operation opens its own connection and releases it before
//! returning: closed explicitly on success, dropped (which closes it) on
//! every error path. Nothing is held between calls.

use crate::config::StorageConfig;
use crate::core::error::{Result, StorageError};
use crate::core::order::{
    CakeType, NewOrder, Order, OrderId, OrderStatus, OrderUpdate, price_from_cents,
    price_to_cents,
};
use crate::core::OrderStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Schema version written by [`SqliteOrderStore::initialize`]
pub const SCHEMA_VERSION: i64 = 1;

const CREATE_ORDERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_name TEXT NOT NULL,
    cake_type TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    price INTEGER NOT NULL,
    delivery_date TEXT NOT NULL,
    notes TEXT,
    status TEXT NOT NULL DEFAULT 'InProgress'
)";

const SELECT_ORDER_COLUMNS: &str = "SELECT id, customer_name, cake_type, quantity, price, \
     delivery_date, notes, status FROM orders";

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// One `orders` row as stored
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    cake_type: String,
    quantity: i64,
    price: i64,
    delivery_date: NaiveDate,
    notes: Option<String>,
    status: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = StorageError;

    fn try_from(row: OrderRow) -> std::result::Result<Self, Self::Error> {
        let cake_type: CakeType = row
            .cake_type
            .parse()
            .map_err(|e| StorageError::integrity(format!("order {}: {}", row.id, e)))?;
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|e| StorageError::integrity(format!("order {}: {}", row.id, e)))?;

        Ok(Order {
            id: OrderId(row.id),
            customer_name: row.customer_name,
            cake_type,
            quantity: row.quantity,
            price: price_from_cents(row.price),
            delivery_date: row.delivery_date,
            notes: row.notes,
            status,
        })
    }
}

// ---------------------------------------------------------------------------
// SqliteOrderStore
// ---------------------------------------------------------------------------

/// Order store backed by one SQLite file.
///
/// Construction does no I/O; the file is created by [`OrderStore::initialize`].
/// Other operations never create it, so using a store before initializing it
/// fails with [`StorageError::Connection`].
///
/// # Example
///
/// ```rust,ignore
/// use bakery::storage::SqliteOrderStore;
///
/// let store = SqliteOrderStore::open("bakery_orders.db");
/// store.initialize().await?;
/// let id = store.create(new_order).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SqliteOrderStore {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl SqliteOrderStore {
    /// Store for the database file at `path`, with default settings
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::from_config(&StorageConfig {
            path: path.as_ref().to_path_buf(),
            ..StorageConfig::default()
        })
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

        Self {
            path: config.path.clone(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self, create_if_missing: bool) -> Result<SqliteConnection> {
        self.options
            .clone()
            .create_if_missing(create_if_missing)
            .connect()
            .await
            .map_err(|e| {
                StorageError::Connection {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                }
                .into()
            })
    }
}

/// Close a connection after a successful operation.
///
/// The operation's outcome is already durable, so a failing close is only
/// logged.
async fn release(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "Failed to close order database connection");
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn initialize(&self) -> Result<()> {
        let mut conn = self.connect(true).await?;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| StorageError::query("initialize", e))?;

        sqlx::query(CREATE_ORDERS_TABLE)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::query("initialize", e))?;

        let found: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| StorageError::query("initialize", e))?;

        if found > SCHEMA_VERSION {
            return Err(StorageError::SchemaVersion {
                found,
                supported: SCHEMA_VERSION,
            }
            .into());
        }
        if found < SCHEMA_VERSION {
            // PRAGMA arguments cannot be bound
            let stamp = format!("PRAGMA user_version = {}", SCHEMA_VERSION);
            sqlx::query(&stamp)
                .execute(&mut *tx)
                .await
                .map_err(|e| StorageError::query("initialize", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::query("initialize", e))?;
        release(conn).await;

        tracing::info!(
            path = %self.path.display(),
            schema_version = SCHEMA_VERSION,
            "Order database ready"
        );
        Ok(())
    }

    async fn create(&self, order: NewOrder) -> Result<OrderId> {
        let price = price_to_cents(order.price)?;
        let mut conn = self.connect(false).await?;

        let done = sqlx::query(
            "INSERT INTO orders (customer_name, cake_type, quantity, price, delivery_date, notes) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&order.customer_name)
        .bind(order.cake_type.as_str())
        .bind(order.quantity)
        .bind(price)
        .bind(order.delivery_date)
        .bind(&order.notes)
        .execute(&mut conn)
        .await
        .map_err(|e| StorageError::query("create", e))?;
        release(conn).await;

        let id = OrderId(done.last_insert_rowid());
        tracing::debug!(order_id = %id, "Order created");
        Ok(id)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>> {
        let mut conn = self.connect(false).await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!("{} WHERE id = ?", SELECT_ORDER_COLUMNS))
            .bind(id.get())
            .fetch_optional(&mut conn)
            .await
            .map_err(|e| StorageError::query("get", e))?;
        release(conn).await;

        Ok(row.map(Order::try_from).transpose()?)
    }

    async fn list_all(&self) -> Result<Vec<Order>> {
        let mut conn = self.connect(false).await?;

        let rows = sqlx::query_as::<_, OrderRow>(&format!("{} ORDER BY id", SELECT_ORDER_COLUMNS))
            .fetch_all(&mut conn)
            .await
            .map_err(|e| StorageError::query("list", e))?;
        release(conn).await;

        let orders = rows
            .into_iter()
            .map(Order::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(orders)
    }

    async fn update(&self, id: OrderId, update: OrderUpdate) -> Result<bool> {
        let price = price_to_cents(update.price)?;
        let mut conn = self.connect(false).await?;

        let done = sqlx::query(
            "UPDATE orders SET customer_name = ?, cake_type = ?, quantity = ?, price = ?, \
             delivery_date = ?, notes = ?, status = ? WHERE id = ?",
        )
        .bind(&update.customer_name)
        .bind(update.cake_type.as_str())
        .bind(update.quantity)
        .bind(price)
        .bind(update.delivery_date)
        .bind(&update.notes)
        .bind(update.status.as_str())
        .bind(id.get())
        .execute(&mut conn)
        .await
        .map_err(|e| StorageError::query("update", e))?;
        release(conn).await;

        let touched = done.rows_affected() > 0;
        if touched {
            tracing::debug!(order_id = %id, status = %update.status, "Order updated");
        } else {
            tracing::debug!(order_id = %id, "Update matched no order");
        }
        Ok(touched)
    }

    async fn delete(&self, id: OrderId) -> Result<bool> {
        let mut conn = self.connect(false).await?;

        let done = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id.get())
            .execute(&mut conn)
            .await
            .map_err(|e| StorageError::query("delete", e))?;
        release(conn).await;

        let removed = done.rows_affected() > 0;
        if removed {
            tracing::debug!(order_id = %id, "Order deleted");
        } else {
            tracing::debug!(order_id = %id, "Delete matched no order");
        }
        Ok(removed)
    }
}
