//! Notification service - unread accounting derived from thread state.
//!
//! Counts are recomputed from `thread_messages` and `read_cursors` on every
//! call; nothing here is cached or stored, so the numbers cannot diverge
//! from the store.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::actor::Actor;
use crate::ports::{CoreError, OrderRepository, ThreadRepository};

/// Service computing unread-message counts per actor.
pub struct NotificationService {
    orders: Arc<dyn OrderRepository>,
    thread: Arc<dyn ThreadRepository>,
}

impl NotificationService {
    /// Create a new notification service.
    pub fn new(orders: Arc<dyn OrderRepository>, thread: Arc<dyn ThreadRepository>) -> Self {
        Self { orders, thread }
    }

    /// Unread count for one actor on one order.
    ///
    /// Messages the actor sent never count as unread for them.
    pub async fn unread_count(&self, actor_id: i64, order_id: &str) -> Result<i64, CoreError> {
        self.orders
            .get(order_id)
            .await
            .map_err(CoreError::from)?
            .ok_or_else(|| CoreError::NotFound(format!("order {order_id}")))?;
        self.thread
            .unread_count(order_id, actor_id)
            .await
            .map_err(CoreError::from)
    }

    /// Unread counts across all of the actor's visible orders.
    ///
    /// Orders with zero unread messages are omitted.
    pub async fn unread_summary(&self, actor: Actor) -> Result<HashMap<String, i64>, CoreError> {
        let orders = self.orders.list_for(actor).await.map_err(CoreError::from)?;

        let mut summary = HashMap::new();
        for order in orders {
            let count = self
                .thread
                .unread_count(&order.id, actor.id)
                .await
                .map_err(CoreError::from)?;
            if count > 0 {
                summary.insert(order.id, count);
            }
        }
        Ok(summary)
    }
}
