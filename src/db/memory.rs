use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::db::{Storage, StorageError};
use crate::models::{IdentityRecord, TaskRecord};

/// In-process storage backend. Used by the test suite and for running the
/// service without a database; behavior matches [`super::PgStorage`]
/// including the atomic check-and-insert on registration (the whole
/// operation runs under one lock).
#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    identities: Vec<IdentityRecord>,
    // BTreeMap keeps listing order stable for a given storage state.
    tasks: BTreeMap<Uuid, TaskRecord>,
    next_identity_id: i32,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<MutexGuard<'_, Inner>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn insert_identity(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<IdentityRecord, StorageError> {
        let mut inner = self.locked()?;

        if inner.identities.iter().any(|i| i.username == username) {
            return Err(StorageError::Duplicate);
        }

        inner.next_identity_id += 1;
        let record = IdentityRecord {
            id: inner.next_identity_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        inner.identities.push(record.clone());
        Ok(record)
    }

    async fn find_identity(&self, username: &str) -> Result<Option<IdentityRecord>, StorageError> {
        let inner = self.locked()?;
        Ok(inner
            .identities
            .iter()
            .find(|i| i.username == username)
            .cloned())
    }

    async fn insert_task(
        &self,
        user_id: i32,
        text: &str,
        status: &str,
    ) -> Result<TaskRecord, StorageError> {
        let mut inner = self.locked()?;
        let record = TaskRecord {
            id: Uuid::new_v4(),
            user_id,
            text: text.to_string(),
            status: status.to_string(),
        };
        inner.tasks.insert(record.id, record.clone());
        Ok(record)
    }

    async fn tasks_by_user(&self, user_id: i32) -> Result<Vec<TaskRecord>, StorageError> {
        let inner = self.locked()?;
        Ok(inner
            .tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_task(&self, task_id: Uuid) -> Result<Option<TaskRecord>, StorageError> {
        let inner = self.locked()?;
        Ok(inner.tasks.get(&task_id).cloned())
    }

    async fn update_task(
        &self,
        task_id: Uuid,
        text: &str,
        status: &str,
    ) -> Result<bool, StorageError> {
        let mut inner = self.locked()?;
        match inner.tasks.get_mut(&task_id) {
            Some(task) => {
                task.text = text.to_string();
                task.status = status.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_task(&self, task_id: Uuid) -> Result<(), StorageError> {
        let mut inner = self.locked()?;
        inner.tasks.remove(&task_id);
        Ok(())
    }
}
