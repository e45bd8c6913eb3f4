use std::sync::Arc;

use crate::auth::{hash_password, verify_password};
use crate::db::Storage;
use crate::error::AppError;
use crate::models::Identity;

/// Credential management: registration, verification, and username
/// resolution.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn Storage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Registers a new identity. The password is hashed before anything is
    /// persisted. There is no separate existence pre-check: the storage
    /// layer's unique constraint decides races, so concurrent registrations
    /// of one username yield exactly one success.
    pub async fn register(&self, username: &str, password: &str) -> Result<Identity, AppError> {
        let password_hash = hash_password(password)?;
        let record = self
            .storage
            .insert_identity(username, &password_hash)
            .await?;
        log::debug!("registered identity '{}'", record.username);
        Ok(record.into())
    }

    /// Verifies a username/password pair. An unknown username and a wrong
    /// password produce the same failure, so accounts cannot be enumerated
    /// through the login endpoint.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Identity, AppError> {
        let record = match self.storage.find_identity(username).await? {
            Some(record) => record,
            None => return Err(AppError::invalid_credentials()),
        };

        if verify_password(password, &record.password_hash)? {
            Ok(record.into())
        } else {
            Err(AppError::invalid_credentials())
        }
    }

    /// Resolves a username to its identity, if registered.
    pub async fn lookup(&self, username: &str) -> Result<Option<Identity>, AppError> {
        Ok(self
            .storage
            .find_identity(username)
            .await?
            .map(Identity::from))
    }
}
