//! # taskstore - SQLite-backed task persistence
//!
//! Stores users, tasks, and a many-to-many assignment relationship between
//! them in SQLite. Each repository operation runs over a fresh connection
//! with foreign-key enforcement enabled, so cascade deletes and relationship
//! integrity hold no matter which caller mutates the store.

pub mod core;
pub mod db;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use crate::core::{AssignmentRepository, Task, TaskRepository, TaskStatus, User, UserRepository};
pub use crate::db::{Connection, ConnectionProvider, StorePath};
pub use crate::error::{Error, Result};
pub use crate::store::TaskStore;
