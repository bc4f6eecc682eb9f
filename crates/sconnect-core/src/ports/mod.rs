//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Traits are operation-shaped: every multi-step write that must be
//!   atomic is a single port method, so adapters can wrap it in one
//!   transaction
//! - Permission decisions live in the domain and services, never here

pub mod assignment_repository;
pub mod event_emitter;
pub mod order_store;
pub mod thread_repository;

use std::sync::Arc;
use thiserror::Error;

pub use assignment_repository::{AssignmentError, AssignmentRepository};
pub use event_emitter::{NoopEmitter, OrderEventEmitter};
pub use order_store::{OrderRepository, OrderStoreError};
pub use thread_repository::{ThreadError, ThreadRepository};

use crate::domain::status::{OrderStatus, TransitionError};

/// Canonical error type for semantic domain errors.
///
/// Adapters map this to their own surface (HTTP status codes, CLI exit
/// codes). Messages name the offending field, transition, or ownership
/// conflict and never expose internal identifiers beyond the order id.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed input: bad date, empty body, unknown payment method.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reference to a nonexistent order or actor.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation violates a state invariant.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Status edge not in the transition table.
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Role or ownership mismatch.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<OrderStoreError> for CoreError {
    fn from(err: OrderStoreError) -> Self {
        match err {
            OrderStoreError::OrderNotFound(id) => Self::NotFound(format!("order {id}")),
            OrderStoreError::StatusChanged { .. } => Self::Conflict(err.to_string()),
            OrderStoreError::Database(msg) => Self::Storage(msg),
        }
    }
}

impl From<AssignmentError> for CoreError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::OrderNotFound(id) => Self::NotFound(format!("order {id}")),
            AssignmentError::TerminalStatus { .. } => Self::Conflict(err.to_string()),
            AssignmentError::Database(msg) => Self::Storage(msg),
        }
    }
}

impl From<ThreadError> for CoreError {
    fn from(err: ThreadError) -> Self {
        match err {
            ThreadError::OrderNotFound(id) => Self::NotFound(format!("order {id}")),
            ThreadError::NoActiveAssignment(_) | ThreadError::OrderCancelled(_) => {
                Self::Conflict(err.to_string())
            }
            ThreadError::NotParticipant { .. } => Self::Permission(err.to_string()),
            ThreadError::Database(msg) => Self::Storage(msg),
        }
    }
}

impl From<TransitionError> for CoreError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::InvalidEdge { from, to } => Self::InvalidTransition { from, to },
            TransitionError::RoleNotAllowed { .. } => Self::Permission(err.to_string()),
        }
    }
}

/// Container for all repository trait objects.
///
/// Provides a consistent way to wire repositories across adapters without
/// coupling them to concrete implementations. It lives in `sconnect-core`
/// so that `AppCore` can accept it without depending on `sconnect-db`.
#[derive(Clone)]
pub struct Repos {
    /// Order store with the status audit trail.
    pub orders: Arc<dyn OrderRepository>,
    /// Technician assignment store.
    pub assignments: Arc<dyn AssignmentRepository>,
    /// Order-scoped chat and read cursor store.
    pub thread: Arc<dyn ThreadRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        thread: Arc<dyn ThreadRepository>,
    ) -> Self {
        Self {
            orders,
            assignments,
            thread,
        }
    }
}
