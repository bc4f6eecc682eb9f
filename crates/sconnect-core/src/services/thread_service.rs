//! Thread service - order-scoped chat between customer and technician.
//!
//! Who may read a thread is decided here; who may write is decided inside
//! the repository transaction, against the same snapshot the insert commits
//! with.

use std::sync::Arc;

use crate::domain::actor::{Actor, Role};
use crate::domain::thread::{NewThreadMessage, ThreadMessage};
use crate::events::OrderEvent;
use crate::ports::{
    AssignmentRepository, CoreError, OrderEventEmitter, OrderRepository, ThreadRepository,
};

/// Service for the per-order message thread.
pub struct ThreadService {
    orders: Arc<dyn OrderRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    thread: Arc<dyn ThreadRepository>,
    events: Arc<dyn OrderEventEmitter>,
}

impl ThreadService {
    /// Create a new thread service.
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        thread: Arc<dyn ThreadRepository>,
        events: Arc<dyn OrderEventEmitter>,
    ) -> Self {
        Self {
            orders,
            assignments,
            thread,
            events,
        }
    }

    /// Post a message on an order's thread.
    ///
    /// The body must be non-empty. The order must have an active assignment
    /// and must not be cancelled, and the sender must be the order's
    /// customer or the active technician; those checks run in the same
    /// transaction as the insert.
    pub async fn post_message(
        &self,
        order_id: &str,
        sender: Actor,
        body: &str,
    ) -> Result<ThreadMessage, CoreError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(CoreError::Validation("message body is empty".to_string()));
        }

        let message = self
            .thread
            .append_message(NewThreadMessage {
                order_id: order_id.to_string(),
                sender_id: sender.id,
                sender_role: sender.role,
                body: body.to_string(),
            })
            .await?;

        tracing::info!(order_id, sender_id = sender.id, "message posted");
        self.events.emit(OrderEvent::MessagePosted {
            order_id: order_id.to_string(),
            sender_id: sender.id,
        });
        Ok(message)
    }

    /// List an order's messages, ascending by (sent timestamp, id).
    ///
    /// Readable by the customer, the active technician, or an admin.
    /// Messages on a cancelled order remain readable.
    pub async fn list_messages(
        &self,
        order_id: &str,
        requester: Actor,
    ) -> Result<Vec<ThreadMessage>, CoreError> {
        self.check_visibility(order_id, requester).await?;
        self.thread
            .list_messages(order_id)
            .await
            .map_err(CoreError::from)
    }

    /// Advance the requester's read cursor to the latest message. Idempotent.
    pub async fn mark_read(&self, order_id: &str, actor: Actor) -> Result<(), CoreError> {
        self.check_visibility(order_id, actor).await?;
        self.thread
            .mark_read(order_id, actor.id)
            .await
            .map_err(CoreError::from)
    }

    async fn check_visibility(&self, order_id: &str, actor: Actor) -> Result<(), CoreError> {
        let order = self
            .orders
            .get(order_id)
            .await
            .map_err(CoreError::from)?
            .ok_or_else(|| CoreError::NotFound(format!("order {order_id}")))?;

        match actor.role {
            Role::Admin => Ok(()),
            Role::Customer if order.customer_id == actor.id => Ok(()),
            Role::Technician => {
                let active = self.assignments.active_assignment(order_id).await?;
                if active.is_some_and(|a| a.technician_id == actor.id) {
                    Ok(())
                } else {
                    Err(CoreError::Permission(format!(
                        "actor {} is not the active technician on order {order_id}",
                        actor.id
                    )))
                }
            }
            Role::Customer => Err(CoreError::Permission(format!(
                "order {order_id} belongs to another customer"
            ))),
        }
    }
}
