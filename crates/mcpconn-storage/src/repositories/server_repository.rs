//! SQLite implementation of ServerRepository.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mcpconn_core::{format_timestamp, RepoResult, Server, ServerRepository};
use rusqlite::{params, OptionalExtension};
use tokio::sync::Mutex;

use super::timestamp_column;
use crate::Database;

/// SQLite-backed server repository.
pub struct SqliteServerRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteServerRepository {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    fn row_to_server(row: &rusqlite::Row<'_>) -> rusqlite::Result<Server> {
        Ok(Server {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: timestamp_column(row, 3)?,
        })
    }
}

#[async_trait]
impl ServerRepository for SqliteServerRepository {
    async fn create(&self, server: &Server) -> RepoResult<()> {
        let db = self.db.lock().await;

        db.connection().execute(
            "INSERT INTO servers (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                server.id,
                server.name,
                server.description,
                format_timestamp(&server.created_at),
            ],
        )?;

        Ok(())
    }

    async fn get(&self, id: &str) -> RepoResult<Option<Server>> {
        let db = self.db.lock().await;

        let server = db
            .connection()
            .query_row(
                "SELECT id, name, description, created_at FROM servers WHERE id = ?1",
                params![id],
                Self::row_to_server,
            )
            .optional()?;

        Ok(server)
    }

    async fn list(&self) -> RepoResult<Vec<Server>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, name, description, created_at FROM servers ORDER BY created_at, id",
        )?;

        let servers = stmt
            .query_map([], Self::row_to_server)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(servers)
    }
}
