//! Assignment operations - the many-to-many link between users and tasks.

use crate::core::task::Task;
use crate::core::user::User;
use crate::db::{
    schema::{TaskRow, UserRow},
    Connection, ConnectionProvider,
};
use crate::error::{is_foreign_key_violation, is_primary_key_violation, Error, Result};
use tracing::debug;

/// CRUD and traversal over user-task assignments.
///
/// An assignment has no attributes of its own; the composite primary key
/// (user_id, task_id) guarantees at most one row per pair, and cascade
/// deletes keep the table consistent when either side disappears.
pub struct AssignmentRepository {
    provider: ConnectionProvider,
}

impl AssignmentRepository {
    /// Create a repository backed by the given provider.
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    fn conn(&self) -> Result<Connection> {
        self.provider.acquire()
    }

    /// Assign a task to a user.
    ///
    /// Fails with `DuplicateAssignment` if the pair already exists and
    /// with `ForeignKeyViolation` if either id references no row.
    pub fn assign(&self, user_id: i64, task_id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO assignments (user_id, task_id) VALUES (?1, ?2)",
            [user_id, task_id],
        )
        .map_err(|e| match e {
            Error::Db(db) if is_primary_key_violation(&db) => {
                Error::DuplicateAssignment { user_id, task_id }
            }
            Error::Db(db) if is_foreign_key_violation(&db) => {
                Error::ForeignKeyViolation { user_id, task_id }
            }
            other => other,
        })?;

        debug!(user_id, task_id, "assigned task to user");
        Ok(())
    }

    /// Remove an assignment.
    ///
    /// Returns true if the pair existed, false for an absent pair (no-op).
    pub fn unassign(&self, user_id: i64, task_id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "DELETE FROM assignments WHERE user_id = ?1 AND task_id = ?2",
            [user_id, task_id],
        )?;
        debug!(user_id, task_id, removed = rows > 0, "unassigned task");
        Ok(rows > 0)
    }

    /// Get all tasks assigned to a user.
    ///
    /// Empty when the user has no assignments or does not exist.
    pub fn tasks_for_user(&self, user_id: i64) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        let rows = conn.query(
            "SELECT tasks.id, tasks.title, tasks.description, tasks.status
             FROM tasks
             JOIN assignments ON tasks.id = assignments.task_id
             WHERE assignments.user_id = ?1
             ORDER BY tasks.id",
            [user_id],
            TaskRow::from_row,
        )?;
        rows.into_iter().map(Task::from_row).collect()
    }

    /// Get all users assigned to a task.
    ///
    /// Empty when the task has no assignees or does not exist.
    pub fn users_for_task(&self, task_id: i64) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let rows = conn.query(
            "SELECT users.id, users.username
             FROM users
             JOIN assignments ON users.id = assignments.user_id
             WHERE assignments.task_id = ?1
             ORDER BY users.id",
            [task_id],
            UserRow::from_row,
        )?;
        Ok(rows.into_iter().map(User::from_row).collect())
    }
}
