//! Domain entities
//!
//! - `Server` - a remote MCP endpoint, registered outside this system
//! - `Connection` - one attempt to bind a session to a Server
//! - `Tool` - a capability discovered from a Server at connect time

mod connection;
mod server;
mod tool;

pub use connection::*;
pub use server::*;
pub use tool::*;

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp the way the record store persists it.
///
/// Fixed precision keeps lexical order equal to chronological order.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a persisted timestamp, accepting SQLite's `datetime('now')` format too.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}
