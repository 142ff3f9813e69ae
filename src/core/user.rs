//! User model and repository.

use crate::db::{schema::UserRow, Connection, ConnectionProvider};
use crate::error::{is_unique_violation, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A user of the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

impl User {
    /// Convert a UserRow to a User.
    pub fn from_row(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
        }
    }
}

/// CRUD operations over users.
///
/// Every operation acquires its own connection from the provider and
/// releases it on return.
pub struct UserRepository {
    provider: ConnectionProvider,
}

impl UserRepository {
    /// Create a repository backed by the given provider.
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    fn conn(&self) -> Result<Connection> {
        self.provider.acquire()
    }

    /// Create a new user and return the generated id.
    ///
    /// Fails with `DuplicateUsername` if the name is already taken; the
    /// unique constraint guarantees no partial insert.
    pub fn create(&self, username: &str) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute("INSERT INTO users (username) VALUES (?1)", [username])
            .map_err(|e| match e {
                Error::Db(db) if is_unique_violation(&db) => {
                    Error::DuplicateUsername(username.to_string())
                }
                other => other,
            })?;

        let id = conn.last_insert_rowid();
        debug!(id, username, "created user");
        Ok(id)
    }

    /// Get a user by id, or None if absent.
    pub fn get(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let row = conn.query_opt(
            "SELECT id, username FROM users WHERE id = ?1",
            [id],
            UserRow::from_row,
        )?;
        Ok(row.map(User::from_row))
    }

    /// Get all users in insertion order.
    pub fn list(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let rows = conn.query(
            "SELECT id, username FROM users ORDER BY id",
            [],
            UserRow::from_row,
        )?;
        Ok(rows.into_iter().map(User::from_row).collect())
    }

    /// Delete a user by id.
    ///
    /// All assignment rows for the user are removed by cascade. Returns
    /// true if a row was deleted, false for a nonexistent id.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
        debug!(id, deleted = rows > 0, "deleted user");
        Ok(rows > 0)
    }
}
