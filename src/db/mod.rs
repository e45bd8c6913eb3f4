//!
//! # Storage seam
//!
//! The domain components reach the backing store through the [`Storage`]
//! trait, a narrow query interface over the two relations (`identities`,
//! `tasks`). [`PgStorage`] implements it against Postgres; [`MemoryStorage`]
//! implements it in-process so the whole service can be exercised without a
//! database. The handle is constructed once in `main` and injected into the
//! components, never reached for as a global.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{IdentityRecord, TaskRecord};

pub use memory::MemoryStorage;
pub use postgres::PgStorage;

/// Storage failures, narrowed to the two cases callers distinguish.
#[derive(Debug)]
pub enum StorageError {
    /// A unique constraint rejected the write. Only the username column
    /// carries one, so this is always a duplicate registration.
    Duplicate,
    /// The store could not be reached or failed mid-query.
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::Duplicate => write!(f, "unique constraint violation"),
            StorageError::Unavailable(detail) => write!(f, "storage unavailable: {}", detail),
        }
    }
}

impl std::error::Error for StorageError {}

/// The narrow query interface the components are built on.
///
/// Every call is independently atomic; the only cross-call guarantee is
/// that `insert_identity` is an atomic check-and-insert, so a concurrent
/// race on one username produces exactly one success and one
/// [`StorageError::Duplicate`].
#[async_trait]
pub trait Storage: Send + Sync {
    async fn insert_identity(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<IdentityRecord, StorageError>;

    async fn find_identity(&self, username: &str) -> Result<Option<IdentityRecord>, StorageError>;

    /// Inserts a task with a fresh store-assigned id. Ids are never reused.
    async fn insert_task(
        &self,
        user_id: i32,
        text: &str,
        status: &str,
    ) -> Result<TaskRecord, StorageError>;

    /// Tasks owned by one identity, in an order that is stable for a given
    /// storage state (both backends order by task id).
    async fn tasks_by_user(&self, user_id: i32) -> Result<Vec<TaskRecord>, StorageError>;

    async fn find_task(&self, task_id: Uuid) -> Result<Option<TaskRecord>, StorageError>;

    /// Overwrites text and status. Returns `false` when the id does not
    /// resolve; no row is created in that case.
    async fn update_task(
        &self,
        task_id: Uuid,
        text: &str,
        status: &str,
    ) -> Result<bool, StorageError>;

    /// Removes the row if present. Deleting a missing id is not an error.
    async fn delete_task(&self, task_id: Uuid) -> Result<(), StorageError>;
}

/// Builds the Postgres connection pool from config.
pub async fn connect_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect(&config.database_url)
        .await
}

/// Applies the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
