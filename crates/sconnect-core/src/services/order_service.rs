//! Order service - orchestrates order creation, lookup, and transitions.
//!
//! Input validation and permission checks happen here; the atomic write
//! itself is delegated to the `OrderRepository` so that no check-then-write
//! pair can interleave with a concurrent operation on the same order.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::actor::{Actor, Role};
use crate::domain::order::{NewOrder, Order, PaymentMethod, ServiceRef};
use crate::domain::status::{self, OrderStatus, TransitionEvent};
use crate::events::OrderEvent;
use crate::ports::{
    AssignmentRepository, CoreError, OrderEventEmitter, OrderRepository,
};

/// Service for order lifecycle operations.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    events: Arc<dyn OrderEventEmitter>,
}

impl OrderService {
    /// Create a new order service.
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        events: Arc<dyn OrderEventEmitter>,
    ) -> Self {
        Self {
            orders,
            assignments,
            events,
        }
    }

    /// Create a new order for a customer. Initial status is `Pending`.
    ///
    /// The requested date must be today or later and the payment method one
    /// of `cash`, `card`, `wallet`; anything else is a validation error.
    pub async fn create(
        &self,
        customer_id: i64,
        service: ServiceRef,
        requested_date: NaiveDate,
        payment_method: &str,
        notes: Option<String>,
    ) -> Result<Order, CoreError> {
        let payment_method = PaymentMethod::parse(payment_method).ok_or_else(|| {
            CoreError::Validation(format!("unknown payment method: {payment_method}"))
        })?;
        let today = Utc::now().date_naive();
        if requested_date < today {
            return Err(CoreError::Validation(format!(
                "requested date {requested_date} is in the past"
            )));
        }

        let order = self
            .orders
            .insert(NewOrder {
                id: Uuid::new_v4().to_string(),
                customer_id,
                service,
                requested_date,
                payment_method,
                notes,
            })
            .await?;

        tracing::info!(order_id = %order.id, customer_id, "order created");
        self.events.emit(OrderEvent::OrderCreated {
            order_id: order.id.clone(),
            customer_id,
        });
        Ok(order)
    }

    /// Get an order by id.
    pub async fn get(&self, order_id: &str) -> Result<Order, CoreError> {
        self.orders
            .get(order_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("order {order_id}")))
    }

    /// List the orders visible to an actor, most recently updated first.
    pub async fn list_for(&self, actor: Actor) -> Result<Vec<Order>, CoreError> {
        self.orders.list_for(actor).await.map_err(CoreError::from)
    }

    /// Apply a status transition on behalf of an actor.
    ///
    /// The transition table decides whether the edge exists and whether the
    /// actor's role may take it; on top of that, customers may only act on
    /// their own orders and technicians only on orders they actively hold.
    pub async fn update_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        actor: Actor,
    ) -> Result<Order, CoreError> {
        let order = self.get(order_id).await?;
        status::check_transition(order.status, new_status, actor.role)?;
        self.check_ownership(&order, actor).await?;

        let updated = self
            .orders
            .apply_transition(order_id, order.status, new_status, actor.id)
            .await?;

        tracing::info!(
            order_id,
            from = %order.status,
            to = %new_status,
            actor_id = actor.id,
            "order status changed"
        );
        self.events.emit(OrderEvent::StatusChanged {
            order_id: order_id.to_string(),
            from: order.status,
            to: new_status,
        });
        Ok(updated)
    }

    /// The transition audit log for an order, oldest first.
    pub async fn transition_history(
        &self,
        order_id: &str,
    ) -> Result<Vec<TransitionEvent>, CoreError> {
        // Distinguish "no transitions yet" from "no such order".
        self.get(order_id).await?;
        self.orders
            .transition_history(order_id)
            .await
            .map_err(CoreError::from)
    }

    async fn check_ownership(&self, order: &Order, actor: Actor) -> Result<(), CoreError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Customer => {
                if order.customer_id == actor.id {
                    Ok(())
                } else {
                    Err(CoreError::Permission(format!(
                        "order {} belongs to another customer",
                        order.id
                    )))
                }
            }
            Role::Technician => {
                let active = self.assignments.active_assignment(&order.id).await?;
                if active.is_some_and(|a| a.technician_id == actor.id) {
                    Ok(())
                } else {
                    Err(CoreError::Permission(format!(
                        "actor {} is not the active technician on order {}",
                        actor.id, order.id
                    )))
                }
            }
        }
    }
}
