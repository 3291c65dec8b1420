//! McpConn Storage Layer
//!
//! SQLite-backed record store for servers, connections and tools.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │               Connection Lifecycle                   │
//! ├──────────────────────────────────────────────────────┤
//! │               Repository Traits                      │
//! │   (ServerRepository, ConnectionRepository, ...)      │
//! ├──────────────────────────────────────────────────────┤
//! │            SQLite Implementations                    │
//! │ (SqliteServerRepository, SqliteConnectionRepository) │
//! ├──────────────────────────────────────────────────────┤
//! │                   Database                           │
//! │                   (SQLite)                           │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository call holds the database lock for exactly one statement.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcpconn_storage::{Database, SqliteConnectionRepository, SqliteToolRepository};
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//!
//! let db = Arc::new(Mutex::new(Database::open(&path)?));
//! let connections = SqliteConnectionRepository::new(db.clone());
//! let tools = SqliteToolRepository::new(db);
//! ```

mod database;
mod repositories;

pub use database::Database;
pub use repositories::*;

/// Default database file name.
pub const DATABASE_FILE: &str = "mcpconn.db";

/// Get the default database path for the current platform.
pub fn default_database_path() -> Option<std::path::PathBuf> {
    dirs::data_local_dir().map(|p| p.join("mcpconn").join(DATABASE_FILE))
}
