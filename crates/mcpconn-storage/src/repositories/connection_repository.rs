//! SQLite implementation of ConnectionRepository.
//!
//! Manages the connections table. Every method is one statement; the
//! lifecycle relies on status columns, not transactions, to report outcomes.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mcpconn_core::{
    format_timestamp, Connection, ConnectionRecord, ConnectionRepository, ConnectionStatus,
    RepoResult,
};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension};
use tokio::sync::Mutex;
use tracing::debug;

use super::{optional_timestamp_column, timestamp_column};
use crate::Database;

/// SQLite-backed connection repository.
pub struct SqliteConnectionRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteConnectionRepository {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    fn status_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<ConnectionStatus> {
        let raw: String = row.get(idx)?;
        raw.parse()
            .map_err(|e: anyhow::Error| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
    }

    fn row_to_connection(row: &rusqlite::Row<'_>) -> rusqlite::Result<Connection> {
        Ok(Connection {
            id: row.get(0)?,
            server_id: row.get(1)?,
            connection_url: row.get(2)?,
            status: Self::status_column(row, 3)?,
            created_at: timestamp_column(row, 4)?,
            last_ping: optional_timestamp_column(row, 5)?,
            error_message: row.get(6)?,
        })
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ConnectionRecord> {
        let connection = Self::row_to_connection(row)?;
        Ok(ConnectionRecord {
            id: connection.id,
            server_id: connection.server_id,
            connection_url: connection.connection_url,
            status: connection.status,
            created_at: connection.created_at,
            last_ping: connection.last_ping,
            error_message: connection.error_message,
            server_name: row.get(7)?,
            server_description: row.get(8)?,
        })
    }
}

#[async_trait]
impl ConnectionRepository for SqliteConnectionRepository {
    async fn create(&self, connection: &Connection) -> RepoResult<()> {
        let db = self.db.lock().await;

        db.connection().execute(
            "INSERT INTO connections
                (id, server_id, connection_url, status, created_at, last_ping, error_message)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                connection.id,
                connection.server_id,
                connection.connection_url,
                connection.status.as_str(),
                format_timestamp(&connection.created_at),
                connection.last_ping.as_ref().map(format_timestamp),
                connection.error_message,
            ],
        )?;

        debug!(connection_id = %connection.id, server_id = %connection.server_id, "Inserted connection row");
        Ok(())
    }

    async fn get(&self, id: &str) -> RepoResult<Option<Connection>> {
        let db = self.db.lock().await;

        let connection = db
            .connection()
            .query_row(
                "SELECT id, server_id, connection_url, status, created_at, last_ping, error_message
                 FROM connections
                 WHERE id = ?1",
                params![id],
                Self::row_to_connection,
            )
            .optional()?;

        Ok(connection)
    }

    async fn mark_connected(&self, id: &str, at: DateTime<Utc>) -> RepoResult<()> {
        let db = self.db.lock().await;

        db.connection().execute(
            "UPDATE connections SET status = 'connected', last_ping = ?2 WHERE id = ?1",
            params![id, format_timestamp(&at)],
        )?;

        Ok(())
    }

    async fn mark_error_for_server_url(
        &self,
        server_id: &str,
        connection_url: &str,
        message: &str,
    ) -> RepoResult<()> {
        let db = self.db.lock().await;

        let updated = db.connection().execute(
            "UPDATE connections SET status = 'error', error_message = ?3
             WHERE server_id = ?1 AND connection_url = ?2",
            params![server_id, connection_url, message],
        )?;

        debug!(server_id, connection_url, updated, "Marked connection rows as error");
        Ok(())
    }

    async fn touch(&self, id: &str, at: DateTime<Utc>) -> RepoResult<()> {
        let db = self.db.lock().await;

        db.connection().execute(
            "UPDATE connections SET last_ping = ?2 WHERE id = ?1",
            params![id, format_timestamp(&at)],
        )?;

        Ok(())
    }

    async fn set_status(&self, id: &str, status: ConnectionStatus) -> RepoResult<()> {
        let db = self.db.lock().await;

        db.connection().execute(
            "UPDATE connections SET status = ?2 WHERE id = ?1",
            params![id, status.as_str()],
        )?;

        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> RepoResult<Vec<ConnectionRecord>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut stmt = conn.prepare(
            "SELECT c.id, c.server_id, c.connection_url, c.status, c.created_at,
                    c.last_ping, c.error_message, s.name, s.description
             FROM connections c
             LEFT JOIN servers s ON s.id = c.server_id
             ORDER BY c.created_at DESC, c.rowid DESC
             LIMIT ?1",
        )?;

        let records = stmt
            .query_map(params![limit as i64], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}
