//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures. Every multi-step write runs in a single
//! transaction, keyed by the order row it touches.

mod row_mappers;
mod sqlite_assignment_repository;
mod sqlite_order_repository;
mod sqlite_thread_repository;

pub use sqlite_assignment_repository::SqliteAssignmentRepository;
pub use sqlite_order_repository::SqliteOrderRepository;
pub use sqlite_thread_repository::SqliteThreadRepository;
