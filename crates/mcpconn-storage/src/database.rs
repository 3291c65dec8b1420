//! SQLite database wrapper.
//!
//! Schema files under `migrations/` are applied in version order. Each applied
//! version is recorded in `schema_migrations` together with its file name, so
//! reopening a database only applies what is missing.

use anyhow::{Context, Result};
use chrono::Utc;
use mcpconn_core::format_timestamp;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

const SCHEMA_MIGRATIONS: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL
)";

/// `(version, file name, sql)` in ascending version order.
const MIGRATIONS: &[(i64, &str, &str)] = &[(
    1,
    "001_initial.sql",
    include_str!("migrations/001_initial.sql"),
)];

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file, creating its directory if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {:?}", path))?;
        // WAL lets readers proceed while a statement writes
        conn.pragma_update(None, "journal_mode", "WAL")?;
        debug!(path = ?path, "Opened database");

        Self::migrated(conn)
    }

    /// In-memory database with the full schema.
    pub fn open_in_memory() -> Result<Self> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(mut conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_MIGRATIONS)?;
        let applied = current_version(&conn)?;

        for &(version, name, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > applied) {
            let tx = conn.transaction()?;
            tx.execute_batch(sql)
                .with_context(|| format!("Migration {} failed", name))?;
            tx.execute(
                "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
                params![version, name, format_timestamp(&Utc::now())],
            )?;
            tx.commit()?;
            info!(version, name, "Applied migration");
        }

        Ok(Self { conn })
    }

    /// Highest applied migration version, 0 for an empty database.
    pub fn schema_version(&self) -> i64 {
        current_version(&self.conn).unwrap_or(0)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn current_version(conn: &Connection) -> Result<i64> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}
