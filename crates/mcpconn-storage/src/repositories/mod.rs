//! Repository implementations using SQLite.

mod connection_repository;
mod server_repository;
mod tool_repository;

pub use connection_repository::SqliteConnectionRepository;
pub use server_repository::SqliteServerRepository;
pub use tool_repository::SqliteToolRepository;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;

/// Read a required RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    mcpconn_core::parse_timestamp(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("Invalid timestamp: {}", raw).into(),
        )
    })
}

/// Read a nullable timestamp column.
pub(crate) fn optional_timestamp_column(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(_) => timestamp_column(row, idx).map(Some),
        None => Ok(None),
    }
}
