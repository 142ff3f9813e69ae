//! Task store facade.

use crate::core::{AssignmentRepository, TaskRepository, UserRepository};
use crate::db::{ConnectionProvider, Schema, StorePath};
use crate::error::Result;
use std::path::Path;
use tracing::info;

/// The task store: one provisioned database, three repositories.
///
/// Opening a store builds a single connection provider, provisions the
/// schema, and hands the provider to each repository. The store itself
/// holds no live connection.
pub struct TaskStore {
    pub users: UserRepository,
    pub tasks: TaskRepository,
    pub assignments: AssignmentRepository,
}

impl TaskStore {
    /// Open (and provision if needed) the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_provider(ConnectionProvider::new(StorePath::new(path)))
    }

    /// Open the store at the default location, "tasks.db".
    pub fn open_default() -> Result<Self> {
        Self::with_provider(ConnectionProvider::new(StorePath::default_path()))
    }

    /// Build a store from an explicitly constructed provider.
    pub fn with_provider(provider: ConnectionProvider) -> Result<Self> {
        let conn = provider.acquire()?;
        Schema::provision(&conn)?;
        drop(conn);
        info!(path = %provider.path().as_path().display(), "task store ready");

        Ok(Self {
            users: UserRepository::new(provider.clone()),
            tasks: TaskRepository::new(provider.clone()),
            assignments: AssignmentRepository::new(provider),
        })
    }
}
