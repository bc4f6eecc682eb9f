//! Order-scoped chat thread types.
//!
//! Messages are append-only: once persisted they are never mutated or
//! deleted, even when the order reaches a terminal status. Ordering is by
//! sent timestamp with the insertion id breaking ties.

use serde::{Deserialize, Serialize};

use super::actor::Role;

/// A chat message attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: i64,
    pub order_id: String,
    pub sender_id: i64,
    pub sender_role: Role,
    pub body: String,
    pub sent_at: String,
}

/// Data for appending a new message to an order's thread.
#[derive(Debug, Clone)]
pub struct NewThreadMessage {
    pub order_id: String,
    pub sender_id: i64,
    pub sender_role: Role,
    pub body: String,
}

/// Per-actor, per-order marker of the last message the actor has seen.
///
/// Created lazily on first read; only ever moves forward. `None` means no
/// message has been read yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCursor {
    pub actor_id: i64,
    pub order_id: String,
    pub last_read_message_id: Option<i64>,
}
