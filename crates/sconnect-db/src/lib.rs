//! `SQLite` adapters for the sconnect core.
//!
//! Implements the `sconnect-core` port traits over `sqlx`, owns the schema
//! (see [`setup`]), and exposes a [`CoreFactory`] for wiring a complete
//! `AppCore` at an adapter's composition root.

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export repository implementations
pub use repositories::{
    SqliteAssignmentRepository, SqliteOrderRepository, SqliteThreadRepository,
};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
