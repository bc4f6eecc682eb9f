//! Order status machine.
//!
//! The transition table here is the single source of truth for which status
//! edges exist and which roles may take them. Adapters must never
//! re-implement role logic; they call [`check_transition`] and translate the
//! error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::actor::Role;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Parse a status from its stored string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Assigned" => Some(Self::Assigned),
            "InProgress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Convert status to its stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Assigned => "Assigned",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether no further transition is permitted from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transition attempt that the table rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("no transition from {from} to {to}")]
    InvalidEdge { from: OrderStatus, to: OrderStatus },

    #[error("role {role} may not move an order from {from} to {to}")]
    RoleNotAllowed {
        from: OrderStatus,
        to: OrderStatus,
        role: Role,
    },
}

/// The full transition table: (from, to, roles allowed to take the edge).
///
/// `Pending -> Assigned` is normally taken by the assignment manager as a
/// side effect of assigning a technician, but an admin may also apply it
/// directly.
const TRANSITIONS: &[(OrderStatus, OrderStatus, &[Role])] = &[
    (OrderStatus::Pending, OrderStatus::Assigned, &[Role::Admin]),
    (
        OrderStatus::Pending,
        OrderStatus::Cancelled,
        &[Role::Customer, Role::Admin],
    ),
    (
        OrderStatus::Assigned,
        OrderStatus::InProgress,
        &[Role::Technician, Role::Admin],
    ),
    (
        OrderStatus::Assigned,
        OrderStatus::Cancelled,
        &[Role::Customer, Role::Admin],
    ),
    (
        OrderStatus::InProgress,
        OrderStatus::Completed,
        &[Role::Technician, Role::Admin],
    ),
    (
        OrderStatus::InProgress,
        OrderStatus::Cancelled,
        &[Role::Admin],
    ),
];

/// Look up the roles permitted to take the `from -> to` edge, if it exists.
#[must_use]
pub fn allowed_roles(from: OrderStatus, to: OrderStatus) -> Option<&'static [Role]> {
    TRANSITIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, roles)| *roles)
}

/// Validate a status transition for the given role.
pub fn check_transition(
    from: OrderStatus,
    to: OrderStatus,
    role: Role,
) -> Result<(), TransitionError> {
    let roles = allowed_roles(from, to).ok_or(TransitionError::InvalidEdge { from, to })?;
    if roles.contains(&role) {
        Ok(())
    } else {
        Err(TransitionError::RoleNotAllowed { from, to, role })
    }
}

/// One row of the append-only status audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub id: i64,
    pub order_id: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub actor_id: i64,
    pub occurred_at: String,
}
