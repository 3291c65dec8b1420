//! SQLite implementation of ToolRepository.
//!
//! Tool rows are append-only: discovery inserts, never upserts.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mcpconn_core::{format_timestamp, RepoResult, Tool, ToolRepository};
use rusqlite::params;
use rusqlite::types::Type;
use tokio::sync::Mutex;

use super::timestamp_column;
use crate::Database;

/// SQLite-backed tool repository.
pub struct SqliteToolRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteToolRepository {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    fn row_to_tool(row: &rusqlite::Row<'_>) -> rusqlite::Result<Tool> {
        let schema: String = row.get(4)?;
        Ok(Tool {
            id: row.get(0)?,
            server_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            input_schema: serde_json::from_str(&schema).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
            created_at: timestamp_column(row, 5)?,
        })
    }
}

#[async_trait]
impl ToolRepository for SqliteToolRepository {
    async fn insert(&self, tool: &Tool) -> RepoResult<()> {
        let schema = serde_json::to_string(&tool.input_schema)?;
        let db = self.db.lock().await;

        db.connection().execute(
            "INSERT INTO tools (id, server_id, name, description, input_schema, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                tool.id,
                tool.server_id,
                tool.name,
                tool.description,
                schema,
                format_timestamp(&tool.created_at),
            ],
        )?;

        Ok(())
    }

    async fn list_for_server(&self, server_id: &str) -> RepoResult<Vec<Tool>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, server_id, name, description, input_schema, created_at
             FROM tools
             WHERE server_id = ?1
             ORDER BY rowid",
        )?;

        let tools = stmt
            .query_map(params![server_id], Self::row_to_tool)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tools)
    }
}
