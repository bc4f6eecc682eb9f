//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the core with
//! `SQLite` repositories. It is focused purely on construction and should
//! not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use sconnect_core::Repos;
use sconnect_core::services::AppCore;

use crate::repositories::{
    SqliteAssignmentRepository, SqliteOrderRepository, SqliteThreadRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a `SQLite` connection pool.
    ///
    /// # Arguments
    ///
    /// * `db_url` - `SQLite` connection URL (e.g., "sqlite:~/.sconnect/sconnect.db")
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Build all `SQLite` repositories from a pool.
    ///
    /// Returns a `Repos` struct from `sconnect-core` containing
    /// trait-object-wrapped repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteOrderRepository::new(pool.clone())),
            Arc::new(SqliteAssignmentRepository::new(pool.clone())),
            Arc::new(SqliteThreadRepository::new(pool)),
        )
    }

    /// Build a complete `AppCore` instance from a pool.
    ///
    /// This is the recommended single-step way for adapters to obtain a
    /// fully composed `AppCore`:
    ///
    /// ```ignore
    /// use sconnect_db::{CoreFactory, setup_database};
    ///
    /// let pool = setup_database(&db_path).await?;
    /// let core = CoreFactory::build_app_core(pool);
    /// ```
    pub fn build_app_core(pool: SqlitePool) -> AppCore {
        AppCore::new(Self::build_repos(pool))
    }

    /// Create an order repository from a pool.
    pub fn order_repository(pool: SqlitePool) -> Arc<SqliteOrderRepository> {
        Arc::new(SqliteOrderRepository::new(pool))
    }

    /// Create an assignment repository from a pool.
    pub fn assignment_repository(pool: SqlitePool) -> Arc<SqliteAssignmentRepository> {
        Arc::new(SqliteAssignmentRepository::new(pool))
    }

    /// Create a thread repository from a pool.
    pub fn thread_repository(pool: SqlitePool) -> Arc<SqliteThreadRepository> {
        Arc::new(SqliteThreadRepository::new(pool))
    }
}
