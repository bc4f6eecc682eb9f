//! Canonical event union for order lifecycle events.
//!
//! This module is the single source of truth for the events adapters can
//! observe: order creation, assignment, status transitions, and message
//! posts. Together with the `order_transitions` audit log it makes every
//! state change observable without exposing storage internals.
//!
//! # Wire Format
//!
//! Events serialize with a `type` tag:
//!
//! ```json
//! { "type": "status_changed", "orderId": "…", "from": "Assigned", "to": "InProgress" }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::OrderStatus;

/// Events emitted by the core services after a state change commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    /// A customer created a new order.
    OrderCreated {
        #[serde(rename = "orderId")]
        order_id: String,
        #[serde(rename = "customerId")]
        customer_id: i64,
    },

    /// A technician became the active assignment on an order.
    TechnicianAssigned {
        #[serde(rename = "orderId")]
        order_id: String,
        #[serde(rename = "technicianId")]
        technician_id: i64,
    },

    /// An order moved from one status to another.
    StatusChanged {
        #[serde(rename = "orderId")]
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// A message was appended to an order's thread.
    MessagePosted {
        #[serde(rename = "orderId")]
        order_id: String,
        #[serde(rename = "senderId")]
        sender_id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_changed_wire_format() {
        let event = OrderEvent::StatusChanged {
            order_id: "abc".to_string(),
            from: OrderStatus::Assigned,
            to: OrderStatus::InProgress,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "status_changed");
        assert_eq!(json["orderId"], "abc");
        assert_eq!(json["from"], "Assigned");
        assert_eq!(json["to"], "InProgress");
    }

    #[test]
    fn message_posted_round_trips() {
        let event = OrderEvent::MessagePosted {
            order_id: "abc".to_string(),
            sender_id: 7,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: OrderEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, OrderEvent::MessagePosted { sender_id: 7, .. }));
    }
}
