//! Domain types for the order lifecycle and messaging core.
//!
//! These types are independent of any infrastructure concerns. The status
//! machine in [`status`] is pure logic and carries the only permission table
//! for status transitions.

pub mod actor;
pub mod assignment;
pub mod order;
pub mod status;
pub mod thread;

pub use actor::{Actor, Role};
pub use assignment::Assignment;
pub use order::{NewOrder, Order, PaymentMethod, ServiceRef};
pub use status::{
    OrderStatus, TransitionError, TransitionEvent, allowed_roles, check_transition,
};
pub use thread::{NewThreadMessage, ReadCursor, ThreadMessage};
