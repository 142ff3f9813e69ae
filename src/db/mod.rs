//! Database layer for the task store.
//!
//! Handles SQLite connections, schema provisioning, and low-level queries.

mod connection;
pub mod schema;

pub use connection::{Connection, ConnectionProvider, StorePath};
pub use schema::{Schema, TaskRow, UserRow};
