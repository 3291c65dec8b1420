//! Repository traits for data access
//!
//! These traits define the record store without specifying the
//! implementation (SQLite, in-memory, etc.). Every method maps to a single
//! atomic statement; nothing here spans several statements, so callers must
//! not assume atomicity across calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Connection, ConnectionRecord, ConnectionStatus, Server, Tool};

/// Result type for repository operations
pub type RepoResult<T> = anyhow::Result<T>;

/// Maximum number of rows returned by connection listings.
pub const CONNECTION_LIST_LIMIT: usize = 100;

/// Server repository trait
///
/// Servers are owned by an external registration process; this surface is
/// read-mostly.
#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Register a server
    async fn create(&self, server: &Server) -> RepoResult<()>;

    /// Get a server by ID
    async fn get(&self, id: &str) -> RepoResult<Option<Server>>;

    /// Get all servers
    async fn list(&self) -> RepoResult<Vec<Server>>;
}

/// Connection repository trait
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Insert a new connection row
    async fn create(&self, connection: &Connection) -> RepoResult<()>;

    /// Get a connection by ID
    async fn get(&self, id: &str) -> RepoResult<Option<Connection>>;

    /// Set status `connected` and stamp last-ping
    async fn mark_connected(&self, id: &str, at: DateTime<Utc>) -> RepoResult<()>;

    /// Set status `error` with a message on every row for (server, url).
    ///
    /// Keys on the pair rather than a connection ID, so concurrent attempts
    /// against the same pair can mark each other.
    async fn mark_error_for_server_url(
        &self,
        server_id: &str,
        connection_url: &str,
        message: &str,
    ) -> RepoResult<()>;

    /// Stamp last-ping
    async fn touch(&self, id: &str, at: DateTime<Utc>) -> RepoResult<()>;

    /// Overwrite status unconditionally
    async fn set_status(&self, id: &str, status: ConnectionStatus) -> RepoResult<()>;

    /// Most recent connections first, joined with server name/description
    async fn list_recent(&self, limit: usize) -> RepoResult<Vec<ConnectionRecord>>;
}

/// Tool repository trait
#[async_trait]
pub trait ToolRepository: Send + Sync {
    /// Insert a tool row (never upserts)
    async fn insert(&self, tool: &Tool) -> RepoResult<()>;

    /// Insert several rows, one statement each
    async fn insert_many(&self, tools: &[Tool]) -> RepoResult<()> {
        for tool in tools {
            self.insert(tool).await?;
        }
        Ok(())
    }

    /// All rows for a server in insertion order, duplicates included
    async fn list_for_server(&self, server_id: &str) -> RepoResult<Vec<Tool>>;
}
