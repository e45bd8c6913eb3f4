use uuid::Uuid;

use crate::error::{AppError, ErrorKind};
use crate::models::Task;
use crate::store::{CredentialStore, TaskStore};

/// Copies a task across an ownership boundary. Built entirely from the
/// credential and task primitives; the source task and its owner are never
/// touched.
#[derive(Clone)]
pub struct Sharing {
    credentials: CredentialStore,
    tasks: TaskStore,
}

impl Sharing {
    pub fn new(credentials: CredentialStore, tasks: TaskStore) -> Self {
        Self { credentials, tasks }
    }

    /// Creates a copy of the task owned by `to_username`, status carried
    /// over verbatim (not reset to the creation default). Repeated shares
    /// produce repeated duplicates. The source is read once; if it is
    /// deleted concurrently before the insert, the copy still reflects
    /// what was read.
    pub async fn share(&self, task_id: Uuid, to_username: &str) -> Result<Task, AppError> {
        let source = self.tasks.fetch(task_id).await?;

        let recipient = self
            .credentials
            .lookup(to_username)
            .await?
            .ok_or_else(|| {
                AppError::new(
                    ErrorKind::UnknownRecipient,
                    format!("unknown user '{}'", to_username),
                )
            })?;

        log::debug!("sharing task {} with '{}'", task_id, to_username);
        self.tasks
            .create_for(recipient.id, &source.text, &source.status)
            .await
    }
}
