use std::sync::Arc;
use uuid::Uuid;

use crate::db::Storage;
use crate::error::{AppError, ErrorKind};
use crate::models::{Identity, Task, TaskRecord, DEFAULT_STATUS};

/// Task lifecycle scoped to an owning identity: create, list, update,
/// delete. Every externally reachable operation resolves the caller's
/// username first; an unresolved username is `UnknownOwner`.
#[derive(Clone)]
pub struct TaskStore {
    storage: Arc<dyn Storage>,
}

impl TaskStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn list_by_owner(&self, username: &str) -> Result<Vec<Task>, AppError> {
        let owner = self.resolve_owner(username).await?;
        let tasks = self.storage.tasks_by_user(owner.id).await?;
        Ok(tasks.into_iter().map(Task::from).collect())
    }

    pub async fn create(&self, username: &str, text: &str) -> Result<Task, AppError> {
        let owner = self.resolve_owner(username).await?;
        let record = self
            .storage
            .insert_task(owner.id, text, DEFAULT_STATUS)
            .await?;
        log::debug!("created task {} for '{}'", record.id, username);
        Ok(record.into())
    }

    /// Overwrites text and status. A missing id is an explicit
    /// `TaskNotFound`; nothing is created.
    pub async fn update(&self, task_id: Uuid, text: &str, status: &str) -> Result<(), AppError> {
        if self.storage.update_task(task_id, text, status).await? {
            Ok(())
        } else {
            Err(AppError::new(
                ErrorKind::TaskNotFound,
                format!("no task with id {}", task_id),
            ))
        }
    }

    /// Idempotent: deleting an id that does not resolve succeeds.
    pub async fn delete(&self, task_id: Uuid) -> Result<(), AppError> {
        self.storage.delete_task(task_id).await?;
        Ok(())
    }

    /// Fetches a task by id, owner included. Consumed by sharing; not
    /// routed externally.
    pub(crate) async fn fetch(&self, task_id: Uuid) -> Result<TaskRecord, AppError> {
        self.storage.find_task(task_id).await?.ok_or_else(|| {
            AppError::new(ErrorKind::TaskNotFound, format!("no task with id {}", task_id))
        })
    }

    /// Inserts a task for an already-resolved owner with an explicit
    /// status. Consumed by sharing; not routed externally.
    pub(crate) async fn create_for(
        &self,
        owner_id: i32,
        text: &str,
        status: &str,
    ) -> Result<Task, AppError> {
        let record = self.storage.insert_task(owner_id, text, status).await?;
        Ok(record.into())
    }

    async fn resolve_owner(&self, username: &str) -> Result<Identity, AppError> {
        self.storage
            .find_identity(username)
            .await?
            .map(Identity::from)
            .ok_or_else(|| {
                AppError::new(ErrorKind::UnknownOwner, format!("unknown user '{}'", username))
            })
    }
}
