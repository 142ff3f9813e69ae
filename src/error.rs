//! Error types for the task store.

/// Result type alias for task store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the task store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Username is already taken.
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// The (user, task) pair is already assigned.
    #[error("Task #{task_id} is already assigned to user #{user_id}")]
    DuplicateAssignment { user_id: i64, task_id: i64 },

    /// Assignment references a user or task that does not exist.
    #[error("Cannot link user #{user_id} and task #{task_id}: no such user or task")]
    ForeignKeyViolation { user_id: i64, task_id: i64 },

    /// Task title is empty or whitespace-only.
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// Invalid status string.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Database error.
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
}

/// True if the error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _)
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
}

/// True if the error is a composite primary key violation.
pub(crate) fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _)
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
}

/// True if the error is a foreign key violation.
pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _)
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}
