//! Database connection management.

use crate::error::Result;
use rusqlite::Connection as SqliteConnection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Path to the task store database file.
#[derive(Debug, Clone)]
pub struct StorePath {
    path: PathBuf,
}

impl StorePath {
    /// Create a StorePath with the default filename "tasks.db".
    pub fn default_path() -> Self {
        Self {
            path: PathBuf::from("tasks.db"),
        }
    }

    /// Create a StorePath from a path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path as a reference.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Check if the database file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Default for StorePath {
    fn default() -> Self {
        Self::default_path()
    }
}

/// Hands out one configured connection per logical operation.
///
/// The provider carries only the store location, never a live handle.
/// Every acquired connection has foreign-key enforcement switched on,
/// because SQLite disables it by default on each new connection.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    path: StorePath,
}

impl ConnectionProvider {
    /// Create a provider for the given store location.
    pub fn new(path: StorePath) -> Self {
        Self { path }
    }

    /// Get the configured store location.
    pub fn path(&self) -> &StorePath {
        &self.path
    }

    /// Open a fresh connection scoped to one logical operation.
    ///
    /// The connection closes when dropped, on every exit path.
    pub fn acquire(&self) -> Result<Connection> {
        Connection::open(self.path.as_path())
    }
}

/// Database connection wrapper.
pub struct Connection {
    conn: SqliteConnection,
}

impl Connection {
    /// Open a connection to the database at the given path.
    ///
    /// Enables foreign keys, WAL journaling, and a busy timeout so that
    /// concurrent callers see transient lock contention as a bounded wait
    /// rather than an immediate failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = SqliteConnection::open(path.as_ref())?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        debug!(path = %path.as_ref().display(), "opened database connection");
        Ok(Self { conn })
    }

    /// Execute a statement and return the number of rows affected.
    pub fn execute<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<usize> {
        self.conn.execute(sql, params).map_err(Into::into)
    }

    /// Prepare a statement for execution.
    pub fn prepare(&self, sql: &str) -> Result<rusqlite::Statement<'_>> {
        self.conn.prepare(sql).map_err(Into::into)
    }

    /// Query a single row.
    pub fn query_row<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<T>
    where
        P: rusqlite::Params,
        F: FnOnce(&rusqlite::Row) -> rusqlite::Result<T>,
    {
        self.conn.query_row(sql, params, f).map_err(Into::into)
    }

    /// Query a single row, returning None when no row matches.
    pub fn query_opt<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Option<T>>
    where
        P: rusqlite::Params,
        F: FnOnce(&rusqlite::Row) -> rusqlite::Result<T>,
    {
        use rusqlite::OptionalExtension;
        self.conn.query_row(sql, params, f).optional().map_err(Into::into)
    }

    /// Query multiple rows.
    pub fn query<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Vec<T>>
    where
        P: rusqlite::Params,
        F: FnMut(&rusqlite::Row) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, f)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Get the last inserted row id.
    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    /// Get a reference to the underlying SqliteConnection.
    pub fn as_conn(&self) -> &SqliteConnection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::Schema;
    use tempfile::TempDir;

    fn temp_provider() -> (TempDir, ConnectionProvider) {
        let dir = TempDir::new().unwrap();
        let provider = ConnectionProvider::new(StorePath::new(dir.path().join("tasks.db")));
        (dir, provider)
    }

    #[test]
    fn test_store_path_default() {
        let path = StorePath::default_path();
        assert_eq!(path.as_path(), Path::new("tasks.db"));
    }

    #[test]
    fn test_store_path_new() {
        let path = StorePath::new("custom.db");
        assert_eq!(path.as_path(), Path::new("custom.db"));
    }

    #[test]
    fn test_store_path_exists() {
        let path = StorePath::new("nonexistent.db");
        assert!(!path.exists());

        let temp = tempfile::NamedTempFile::new().unwrap();
        let existing = StorePath::new(temp.path());
        assert!(existing.exists());
    }

    #[test]
    fn test_acquire_enables_foreign_keys() {
        let (_dir, provider) = temp_provider();
        let conn = provider.acquire().unwrap();

        let fk_status: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_status, 1);
    }

    #[test]
    fn test_fresh_connections_share_the_store() {
        let (_dir, provider) = temp_provider();

        {
            let conn = provider.acquire().unwrap();
            Schema::provision(&conn).unwrap();
            conn.execute("INSERT INTO users (username) VALUES (?1)", ["alice"])
                .unwrap();
        }

        // A second acquisition must see the committed row.
        let conn = provider.acquire().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_query_opt_none_when_absent() {
        let (_dir, provider) = temp_provider();
        let conn = provider.acquire().unwrap();
        Schema::provision(&conn).unwrap();

        let row: Option<i64> = conn
            .query_opt("SELECT id FROM users WHERE id = ?1", [42i64], |row| {
                row.get(0)
            })
            .unwrap();
        assert!(row.is_none());
    }
}
