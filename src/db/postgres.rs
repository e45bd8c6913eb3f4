use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{Storage, StorageError};
use crate::models::{IdentityRecord, TaskRecord};

/// Postgres-backed storage over a shared connection pool.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_error(error: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db_error) = &error {
        if matches!(db_error.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return StorageError::Duplicate;
        }
    }
    StorageError::Unavailable(error.to_string())
}

#[async_trait]
impl Storage for PgStorage {
    async fn insert_identity(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<IdentityRecord, StorageError> {
        // The UNIQUE constraint on username makes this the atomic
        // check-and-insert; concurrent duplicates lose here, not in a
        // pre-check.
        sqlx::query_as::<_, IdentityRecord>(
            "INSERT INTO identities (username, password_hash)
             VALUES ($1, $2)
             RETURNING id, username, password_hash, created_at",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)
    }

    async fn find_identity(&self, username: &str) -> Result<Option<IdentityRecord>, StorageError> {
        sqlx::query_as::<_, IdentityRecord>(
            "SELECT id, username, password_hash, created_at
             FROM identities WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)
    }

    async fn insert_task(
        &self,
        user_id: i32,
        text: &str,
        status: &str,
    ) -> Result<TaskRecord, StorageError> {
        sqlx::query_as::<_, TaskRecord>(
            "INSERT INTO tasks (id, user_id, text, status)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, text, status",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(text)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)
    }

    async fn tasks_by_user(&self, user_id: i32) -> Result<Vec<TaskRecord>, StorageError> {
        sqlx::query_as::<_, TaskRecord>(
            "SELECT id, user_id, text, status
             FROM tasks WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)
    }

    async fn find_task(&self, task_id: Uuid) -> Result<Option<TaskRecord>, StorageError> {
        sqlx::query_as::<_, TaskRecord>(
            "SELECT id, user_id, text, status FROM tasks WHERE id = $1",
        )
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)
    }

    async fn update_task(
        &self,
        task_id: Uuid,
        text: &str,
        status: &str,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE tasks SET text = $1, status = $2 WHERE id = $3")
            .bind(text)
            .bind(status)
            .bind(task_id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_task(&self, task_id: Uuid) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }
}
