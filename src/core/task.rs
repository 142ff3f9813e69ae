//! Task model and repository.

use crate::db::{schema::TaskRow, Connection, ConnectionProvider};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Parse a string into a TaskStatus.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }

    /// Convert to string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl Task {
    /// Convert a TaskRow to a Task.
    pub fn from_row(row: TaskRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            status: TaskStatus::parse(&row.status)?,
        })
    }
}

/// CRUD operations over tasks.
pub struct TaskRepository {
    provider: ConnectionProvider,
}

impl TaskRepository {
    /// Create a repository backed by the given provider.
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    fn conn(&self) -> Result<Connection> {
        self.provider.acquire()
    }

    /// Create a new task with status `todo` and return the generated id.
    ///
    /// Blank or whitespace-only titles are rejected.
    pub fn create(&self, title: &str, description: &str) -> Result<i64> {
        if title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO tasks (title, description) VALUES (?1, ?2)",
            [title, description],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, title, "created task");
        Ok(id)
    }

    /// Get a task by id, or None if absent.
    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        let conn = self.conn()?;
        let row = conn.query_opt(
            "SELECT id, title, description, status FROM tasks WHERE id = ?1",
            [id],
            TaskRow::from_row,
        )?;
        row.map(Task::from_row).transpose()
    }

    /// Get all tasks in insertion order.
    pub fn list(&self) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        let rows = conn.query(
            "SELECT id, title, description, status FROM tasks ORDER BY id",
            [],
            TaskRow::from_row,
        )?;
        rows.into_iter().map(Task::from_row).collect()
    }

    /// Get all tasks with the given status, in insertion order.
    pub fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        let rows = conn.query(
            "SELECT id, title, description, status FROM tasks WHERE status = ?1 ORDER BY id",
            [status.as_str()],
            TaskRow::from_row,
        )?;
        rows.into_iter().map(Task::from_row).collect()
    }

    /// Overwrite a task's status.
    ///
    /// Any status is reachable from any other; there is no transition
    /// graph. Returns true if a row was updated, false for a nonexistent id.
    pub fn set_status(&self, id: i64, status: TaskStatus) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE tasks SET status = ?1 WHERE id = ?2",
            rusqlite::params![status.as_str(), id],
        )?;
        debug!(id, status = %status, updated = rows > 0, "set task status");
        Ok(rows > 0)
    }

    /// Delete a task by id.
    ///
    /// All assignment rows for the task are removed by cascade. Returns
    /// true if a row was deleted, false for a nonexistent id.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
        debug!(id, deleted = rows > 0, "deleted task");
        Ok(rows > 0)
    }
}
