//! Message thread repository port definition.
//!
//! The append path re-checks order status, active assignment, and sender
//! entitlement inside its own transaction so the message commits against a
//! consistent snapshot even while assignments change concurrently.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::thread::{NewThreadMessage, ReadCursor, ThreadMessage};

/// Errors that can occur in thread operations.
#[derive(Debug, Error)]
pub enum ThreadError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order {0} has no active assignment; messaging is closed")]
    NoActiveAssignment(String),

    #[error("Order {0} is cancelled; no new messages accepted")]
    OrderCancelled(String),

    #[error("Actor {actor_id} is not a participant on order {order_id}")]
    NotParticipant { order_id: String, actor_id: i64 },

    #[error("Database error: {0}")]
    Database(String),
}

/// Port for order-scoped chat persistence and read cursors.
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Append a message to an order's thread.
    ///
    /// The order must exist, must not be cancelled, and must have an active
    /// assignment; the sender must be the order's customer or the active
    /// technician. All checks and the insert run in one transaction.
    async fn append_message(&self, msg: NewThreadMessage)
    -> Result<ThreadMessage, ThreadError>;

    /// All messages on an order, ascending by (sent timestamp, id).
    async fn list_messages(&self, order_id: &str) -> Result<Vec<ThreadMessage>, ThreadError>;

    /// Advance the actor's read cursor to the latest message on the order.
    ///
    /// Forward-only and idempotent; the cursor row is created lazily. A
    /// no-op on an empty thread.
    async fn mark_read(&self, order_id: &str, actor_id: i64) -> Result<(), ThreadError>;

    /// The actor's read cursor on an order, if one exists yet.
    async fn read_cursor(
        &self,
        order_id: &str,
        actor_id: i64,
    ) -> Result<Option<ReadCursor>, ThreadError>;

    /// Count of messages past the actor's cursor that the actor did not send.
    ///
    /// Always derived from `thread_messages` and `read_cursors`; never
    /// stored, so it cannot diverge.
    async fn unread_count(&self, order_id: &str, actor_id: i64) -> Result<i64, ThreadError>;
}
