//! Database schema and row types.

use crate::db::Connection;
use crate::error::Result;
use rusqlite::Row;

/// Schema provisioning.
pub struct Schema;

impl Schema {
    /// Provision the database schema.
    ///
    /// Creates the users, tasks, and assignments tables with their keys and
    /// constraints. Safe to call on an already-provisioned store: existing
    /// tables and data are left untouched.
    pub fn provision(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                status      TEXT NOT NULL DEFAULT 'todo'
                    CHECK(status IN ('todo', 'in_progress', 'done'))
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS assignments (
                user_id INTEGER NOT NULL,
                task_id INTEGER NOT NULL,
                PRIMARY KEY (user_id, task_id),
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
                FOREIGN KEY (task_id) REFERENCES tasks(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // The composite primary key already covers user_id lookups.
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_assignments_task_id ON assignments(task_id)",
            [],
        )?;

        Ok(())
    }

    /// Check if the schema has been provisioned.
    pub fn is_provisioned(conn: &Connection) -> bool {
        conn.query_opt(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='users'",
            [],
            |_| Ok(()),
        )
        .map(|row| row.is_some())
        .unwrap_or(false)
    }
}

/// Row representation of a user from the database.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
}

impl UserRow {
    /// Create a UserRow from a SQLite row.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
        })
    }
}

/// Row representation of a task from the database.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
}

impl TaskRow {
    /// Create a TaskRow from a SQLite row.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            status: row.get("status")?,
        })
    }
}
