//! Order store port definition.
//!
//! This port defines the interface for persisting orders and their status
//! audit trail. Transition application is compare-and-set on the current
//! status: the write commits only if the order still holds the status the
//! caller validated against, so concurrent transitions on the same order
//! serialize cleanly.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::actor::Actor;
use crate::domain::order::{NewOrder, Order};
use crate::domain::status::{OrderStatus, TransitionEvent};

/// Errors that can occur in order store operations.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order {order_id} no longer in status {expected}, found {actual}")]
    StatusChanged {
        order_id: String,
        expected: OrderStatus,
        actual: OrderStatus,
    },

    #[error("Database error: {0}")]
    Database(String),
}

/// Port for order persistence operations.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order with status `Pending`.
    async fn insert(&self, order: NewOrder) -> Result<Order, OrderStoreError>;

    /// Get an order by id.
    async fn get(&self, order_id: &str) -> Result<Option<Order>, OrderStoreError>;

    /// List the orders visible to an actor, most recently updated first.
    ///
    /// Customers see their own orders, technicians the orders they actively
    /// hold, admins everything.
    async fn list_for(&self, actor: Actor) -> Result<Vec<Order>, OrderStoreError>;

    /// Apply a validated status transition atomically.
    ///
    /// The update is conditional on the order still holding `from`; the
    /// audit row and the `updated_at` bump commit in the same transaction.
    /// Fails with [`OrderStoreError::StatusChanged`] if a concurrent
    /// transition won.
    async fn apply_transition(
        &self,
        order_id: &str,
        from: OrderStatus,
        to: OrderStatus,
        actor_id: i64,
    ) -> Result<Order, OrderStoreError>;

    /// The append-only transition audit log for an order, oldest first.
    async fn transition_history(
        &self,
        order_id: &str,
    ) -> Result<Vec<TransitionEvent>, OrderStoreError>;
}
