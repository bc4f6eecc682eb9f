//! `SQLite` implementation of the `ThreadRepository` trait.
//!
//! The append path runs its entitlement checks and the insert in one
//! transaction, so a message can only commit against the assignment and
//! status snapshot it was checked with.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use sconnect_core::domain::{NewThreadMessage, OrderStatus, ReadCursor, ThreadMessage};
use sconnect_core::ports::thread_repository::{ThreadError, ThreadRepository};

use super::row_mappers::row_to_message;

const MESSAGE_COLUMNS: &str = "id, order_id, sender_id, sender_role, body, sent_at";

/// `SQLite` implementation of the `ThreadRepository` trait.
pub struct SqliteThreadRepository {
    pool: SqlitePool,
}

impl SqliteThreadRepository {
    /// Create a new `SQLite` thread repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn db_err(e: impl std::fmt::Display) -> ThreadError {
    ThreadError::Database(e.to_string())
}

#[async_trait]
impl ThreadRepository for SqliteThreadRepository {
    async fn append_message(
        &self,
        msg: NewThreadMessage,
    ) -> Result<ThreadMessage, ThreadError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let order_row = sqlx::query("SELECT customer_id, status FROM orders WHERE id = ?")
            .bind(&msg.order_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ThreadError::OrderNotFound(msg.order_id.clone()))?;

        let status_str: String = order_row.try_get("status").map_err(db_err)?;
        let status = OrderStatus::parse(&status_str)
            .ok_or_else(|| db_err(format!("invalid order status: {status_str}")))?;
        if status == OrderStatus::Cancelled {
            return Err(ThreadError::OrderCancelled(msg.order_id.clone()));
        }

        let technician_id: i64 = sqlx::query(
            "SELECT technician_id FROM assignments \
             WHERE order_id = ? AND superseded_at IS NULL",
        )
        .bind(&msg.order_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ThreadError::NoActiveAssignment(msg.order_id.clone()))?
        .try_get("technician_id")
        .map_err(db_err)?;

        let customer_id: i64 = order_row.try_get("customer_id").map_err(db_err)?;
        if msg.sender_id != customer_id && msg.sender_id != technician_id {
            return Err(ThreadError::NotParticipant {
                order_id: msg.order_id.clone(),
                actor_id: msg.sender_id,
            });
        }

        let result = sqlx::query(
            "INSERT INTO thread_messages (order_id, sender_id, sender_role, body) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&msg.order_id)
        .bind(msg.sender_id)
        .bind(msg.sender_role.as_str())
        .bind(&msg.body)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let row = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM thread_messages WHERE id = ?"
        ))
        .bind(result.last_insert_rowid())
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        row_to_message(&row).map_err(db_err)
    }

    async fn list_messages(&self, order_id: &str) -> Result<Vec<ThreadMessage>, ThreadError> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM thread_messages \
             WHERE order_id = ? \
             ORDER BY sent_at ASC, id ASC"
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(row_to_message)
            .collect::<Result<_, _>>()
            .map_err(db_err)
    }

    async fn mark_read(&self, order_id: &str, actor_id: i64) -> Result<(), ThreadError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query("SELECT 1 FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ThreadError::OrderNotFound(order_id.to_string()))?;

        let latest: Option<i64> =
            sqlx::query("SELECT MAX(id) AS latest FROM thread_messages WHERE order_id = ?")
                .bind(order_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_err)?
                .try_get("latest")
                .map_err(db_err)?;

        // Nothing to read yet; the cursor is created lazily once a message
        // exists, and only ever moves forward.
        if let Some(latest) = latest {
            sqlx::query(
                "INSERT INTO read_cursors (actor_id, order_id, last_read_message_id) \
                 VALUES (?, ?, ?) \
                 ON CONFLICT(actor_id, order_id) DO UPDATE SET last_read_message_id = \
                 MAX(COALESCE(read_cursors.last_read_message_id, 0), excluded.last_read_message_id)",
            )
            .bind(actor_id)
            .bind(order_id)
            .bind(latest)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)
    }

    async fn read_cursor(
        &self,
        order_id: &str,
        actor_id: i64,
    ) -> Result<Option<ReadCursor>, ThreadError> {
        let row = sqlx::query(
            "SELECT actor_id, order_id, last_read_message_id FROM read_cursors \
             WHERE order_id = ? AND actor_id = ?",
        )
        .bind(order_id)
        .bind(actor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(|row| {
            Ok(ReadCursor {
                actor_id: row.try_get("actor_id").map_err(db_err)?,
                order_id: row.try_get("order_id").map_err(db_err)?,
                last_read_message_id: row.try_get("last_read_message_id").map_err(db_err)?,
            })
        })
        .transpose()
    }

    async fn unread_count(&self, order_id: &str, actor_id: i64) -> Result<i64, ThreadError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM thread_messages \
             WHERE order_id = ? AND sender_id != ? \
             AND id > COALESCE((SELECT last_read_message_id FROM read_cursors \
                                WHERE order_id = ? AND actor_id = ?), 0)",
        )
        .bind(order_id)
        .bind(actor_id)
        .bind(order_id)
        .bind(actor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row.try_get("count").map_err(db_err)
    }
}
