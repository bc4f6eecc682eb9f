//! `SQLite` implementation of the `AssignmentRepository` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use sconnect_core::domain::{Assignment, OrderStatus};
use sconnect_core::ports::assignment_repository::{AssignmentError, AssignmentRepository};

use super::row_mappers::row_to_assignment;

const ASSIGNMENT_COLUMNS: &str =
    "id, order_id, technician_id, assigned_by, assigned_at, superseded_at";

/// `SQLite` implementation of the `AssignmentRepository` trait.
pub struct SqliteAssignmentRepository {
    pool: SqlitePool,
}

impl SqliteAssignmentRepository {
    /// Create a new `SQLite` assignment repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn db_err(e: impl std::fmt::Display) -> AssignmentError {
    AssignmentError::Database(e.to_string())
}

#[async_trait]
impl AssignmentRepository for SqliteAssignmentRepository {
    async fn assign(
        &self,
        order_id: &str,
        technician_id: i64,
        assigned_by: i64,
    ) -> Result<Assignment, AssignmentError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let row = sqlx::query("SELECT status FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?
            .ok_or_else(|| AssignmentError::OrderNotFound(order_id.to_string()))?;

        let status_str: String = row.try_get("status").map_err(db_err)?;
        let status = OrderStatus::parse(&status_str)
            .ok_or_else(|| db_err(format!("invalid order status: {status_str}")))?;
        if status.is_terminal() {
            return Err(AssignmentError::TerminalStatus {
                order_id: order_id.to_string(),
                status,
            });
        }

        // Supersede any prior active binding; history is retained.
        sqlx::query(
            "UPDATE assignments SET superseded_at = datetime('now') \
             WHERE order_id = ? AND superseded_at IS NULL",
        )
        .bind(order_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let result = sqlx::query(
            "INSERT INTO assignments (order_id, technician_id, assigned_by) VALUES (?, ?, ?)",
        )
        .bind(order_id)
        .bind(technician_id)
        .bind(assigned_by)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let assignment_id = result.last_insert_rowid();

        // First assignment also moves the order out of Pending, with its
        // own audit row, in this same transaction.
        if status == OrderStatus::Pending {
            sqlx::query(
                "UPDATE orders SET status = 'Assigned', updated_at = datetime('now') \
                 WHERE id = ?",
            )
            .bind(order_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

            sqlx::query(
                "INSERT INTO order_transitions (order_id, from_status, to_status, actor_id) \
                 VALUES (?, 'Pending', 'Assigned', ?)",
            )
            .bind(order_id)
            .bind(assigned_by)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        let row = sqlx::query(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE id = ?"
        ))
        .bind(assignment_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        row_to_assignment(&row).map_err(db_err)
    }

    async fn active_assignment(
        &self,
        order_id: &str,
    ) -> Result<Option<Assignment>, AssignmentError> {
        let row = sqlx::query(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments \
             WHERE order_id = ? AND superseded_at IS NULL"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref()
            .map(row_to_assignment)
            .transpose()
            .map_err(db_err)
    }

    async fn assignment_history(
        &self,
        order_id: &str,
    ) -> Result<Vec<Assignment>, AssignmentError> {
        let rows = sqlx::query(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments \
             WHERE order_id = ? \
             ORDER BY id DESC"
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(row_to_assignment)
            .collect::<Result<_, _>>()
            .map_err(db_err)
    }
}
