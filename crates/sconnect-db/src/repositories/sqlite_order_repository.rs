//! `SQLite` implementation of the `OrderRepository` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use sconnect_core::domain::{
    Actor, NewOrder, Order, OrderStatus, Role, TransitionEvent,
};
use sconnect_core::ports::order_store::{OrderRepository, OrderStoreError};

use super::row_mappers::{ORDER_SELECT_COLUMNS, row_to_order, row_to_transition};

/// `SQLite` implementation of the `OrderRepository` trait.
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    /// Create a new `SQLite` order repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn db_err(e: impl std::fmt::Display) -> OrderStoreError {
    OrderStoreError::Database(e.to_string())
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn insert(&self, order: NewOrder) -> Result<Order, OrderStoreError> {
        sqlx::query(
            "INSERT INTO orders (id, customer_id, service_id, service_name, price, \
             requested_date, payment_method, notes, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'Pending')",
        )
        .bind(&order.id)
        .bind(order.customer_id)
        .bind(order.service.id)
        .bind(&order.service.name)
        .bind(order.service.price)
        .bind(order.requested_date)
        .bind(order.payment_method.as_str())
        .bind(&order.notes)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        self.get(&order.id)
            .await?
            .ok_or_else(|| db_err("inserted order not readable"))
    }

    async fn get(&self, order_id: &str) -> Result<Option<Order>, OrderStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {ORDER_SELECT_COLUMNS} FROM orders WHERE id = ?"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(row_to_order).transpose().map_err(db_err)
    }

    async fn list_for(&self, actor: Actor) -> Result<Vec<Order>, OrderStoreError> {
        let rows = match actor.role {
            Role::Customer => {
                sqlx::query(&format!(
                    "SELECT {ORDER_SELECT_COLUMNS} FROM orders \
                     WHERE customer_id = ? \
                     ORDER BY updated_at DESC, created_at DESC"
                ))
                .bind(actor.id)
                .fetch_all(&self.pool)
                .await
            }
            Role::Technician => {
                sqlx::query(
                    "SELECT o.id, o.customer_id, o.service_id, o.service_name, o.price, \
                     o.requested_date, o.payment_method, o.notes, o.status, \
                     o.created_at, o.updated_at \
                     FROM orders o \
                     JOIN assignments a ON a.order_id = o.id AND a.superseded_at IS NULL \
                     WHERE a.technician_id = ? \
                     ORDER BY o.updated_at DESC, o.created_at DESC",
                )
                .bind(actor.id)
                .fetch_all(&self.pool)
                .await
            }
            Role::Admin => {
                sqlx::query(&format!(
                    "SELECT {ORDER_SELECT_COLUMNS} FROM orders \
                     ORDER BY updated_at DESC, created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(db_err)?;

        rows.iter().map(row_to_order).collect::<Result<_, _>>().map_err(db_err)
    }

    async fn apply_transition(
        &self,
        order_id: &str,
        from: OrderStatus,
        to: OrderStatus,
        actor_id: i64,
    ) -> Result<Order, OrderStoreError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        // Compare-and-set: commits only if the order still holds `from`.
        let result = sqlx::query(
            "UPDATE orders SET status = ?, updated_at = datetime('now') \
             WHERE id = ? AND status = ?",
        )
        .bind(to.as_str())
        .bind(order_id)
        .bind(from.as_str())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            let row = sqlx::query("SELECT status FROM orders WHERE id = ?")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_err)?;

            return Err(match row {
                None => OrderStoreError::OrderNotFound(order_id.to_string()),
                Some(row) => {
                    let actual_str: String = row.try_get("status").map_err(db_err)?;
                    let actual = OrderStatus::parse(&actual_str)
                        .ok_or_else(|| db_err(format!("invalid order status: {actual_str}")))?;
                    OrderStoreError::StatusChanged {
                        order_id: order_id.to_string(),
                        expected: from,
                        actual,
                    }
                }
            });
        }

        sqlx::query(
            "INSERT INTO order_transitions (order_id, from_status, to_status, actor_id) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(actor_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let row = sqlx::query(&format!(
            "SELECT {ORDER_SELECT_COLUMNS} FROM orders WHERE id = ?"
        ))
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        row_to_order(&row).map_err(db_err)
    }

    async fn transition_history(
        &self,
        order_id: &str,
    ) -> Result<Vec<TransitionEvent>, OrderStoreError> {
        let rows = sqlx::query(
            "SELECT id, order_id, from_status, to_status, actor_id, occurred_at \
             FROM order_transitions \
             WHERE order_id = ? \
             ORDER BY id ASC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(row_to_transition)
            .collect::<Result<_, _>>()
            .map_err(db_err)
    }
}
