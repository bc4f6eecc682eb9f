//! Core domain for the sconnect service platform: the order lifecycle and
//! the order-scoped messaging subsystem.
//!
//! The crate is split hexagonally:
//!
//! - [`domain`] - plain types plus the pure status machine
//! - [`ports`] - trait abstractions the core expects from infrastructure
//! - [`services`] - thin orchestrators wired together behind [`AppCore`]
//! - [`events`] - the lifecycle event union adapters can observe
//!
//! Identity resolution, the service catalog, and all presentation concerns
//! live outside this crate; callers hand every operation an already
//! authenticated [`Actor`].

pub mod domain;
pub mod events;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    Actor, Assignment, NewOrder, NewThreadMessage, Order, OrderStatus, PaymentMethod, ReadCursor,
    Role, ServiceRef, ThreadMessage, TransitionError, TransitionEvent, allowed_roles,
    check_transition,
};
pub use events::OrderEvent;
pub use ports::{
    AssignmentError, AssignmentRepository, CoreError, NoopEmitter, OrderEventEmitter,
    OrderRepository, OrderStoreError, Repos, ThreadError, ThreadRepository,
};
pub use services::{
    AppCore, AssignmentService, NotificationService, OrderService, ThreadService,
};
