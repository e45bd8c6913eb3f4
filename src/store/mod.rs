//!
//! # Domain components
//!
//! The three cores of the service: credential management, task lifecycle,
//! and sharing. Each is a thin struct over an injected [`Storage`] handle,
//! so the same components run against Postgres in production and the
//! in-memory backend in tests.

pub mod credentials;
pub mod sharing;
pub mod tasks;

pub use credentials::CredentialStore;
pub use sharing::Sharing;
pub use tasks::TaskStore;

use std::sync::Arc;

use crate::db::Storage;

/// Everything the handlers need, wired once at startup and handed to actix
/// as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub tasks: TaskStore,
    pub sharing: Sharing,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let credentials = CredentialStore::new(storage.clone());
        let tasks = TaskStore::new(storage);
        let sharing = Sharing::new(credentials.clone(), tasks.clone());
        Self {
            credentials,
            tasks,
            sharing,
        }
    }
}
