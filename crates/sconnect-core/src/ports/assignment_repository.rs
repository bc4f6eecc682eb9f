//! Assignment repository port definition.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::assignment::Assignment;
use crate::domain::status::OrderStatus;

/// Errors that can occur in assignment operations.
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order {order_id} is {status}; no technician can be assigned")]
    TerminalStatus {
        order_id: String,
        status: OrderStatus,
    },

    #[error("Database error: {0}")]
    Database(String),
}

/// Port for technician assignment persistence.
///
/// Reassignment is a second `assign` call; the store does not distinguish
/// first assignment from reassignment beyond the audit trail.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Bind a technician to an order as the active assignment.
    ///
    /// In one transaction: rejects terminal orders, supersedes any prior
    /// active assignment (retained, not deleted), inserts the new binding,
    /// and bumps a `Pending` order to `Assigned` with an audit row.
    async fn assign(
        &self,
        order_id: &str,
        technician_id: i64,
        assigned_by: i64,
    ) -> Result<Assignment, AssignmentError>;

    /// The active assignment for an order, if any.
    async fn active_assignment(&self, order_id: &str)
    -> Result<Option<Assignment>, AssignmentError>;

    /// All assignments ever made for an order, newest first.
    async fn assignment_history(&self, order_id: &str) -> Result<Vec<Assignment>, AssignmentError>;
}
