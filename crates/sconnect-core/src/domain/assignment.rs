//! Technician assignment types.

use serde::{Deserialize, Serialize};

/// A technician binding for an order.
///
/// At most one assignment per order is active at a time. Reassignment
/// supersedes the prior binding rather than deleting it; superseded rows are
/// retained for audit only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub order_id: String,
    pub technician_id: i64,
    /// Actor who created the binding (admin, or the system on auto-pick).
    pub assigned_by: i64,
    pub assigned_at: String,
    /// Set when a later assignment replaced this one.
    pub superseded_at: Option<String>,
}

impl Assignment {
    /// Whether this is the current binding for its order.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.superseded_at.is_none()
    }
}
