//! Connection entity and its lifecycle status

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a connection attempt.
///
/// ```text
/// connecting ──► connected ──► disconnected
///     │              │
///     └──► error ◄───┘ (only ever set externally)
/// ```
///
/// `error` and `disconnected` are terminal for a row; reconnecting always
/// creates a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Attempt in progress (initial state)
    Connecting,
    /// Registered with the proxy and tool catalog fetched
    Connected,
    /// Explicitly disconnected
    Disconnected,
    /// Attempt failed
    Error,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "connecting" => Ok(Self::Connecting),
            "connected" => Ok(Self::Connected),
            "disconnected" => Ok(Self::Disconnected),
            "error" => Ok(Self::Error),
            other => Err(anyhow::anyhow!("Unknown connection status: {}", other)),
        }
    }
}

/// One attempt to bind a client session to a Server.
///
/// Rows are never deleted; disconnection is a status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    /// Referenced server (not owned, may dangle)
    pub server_id: String,
    pub connection_url: String,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
    pub last_ping: Option<DateTime<Utc>>,
    /// Only set while in `error` status
    pub error_message: Option<String>,
}

impl Connection {
    /// A fresh attempt in `connecting` status.
    pub fn connecting(
        id: impl Into<String>,
        server_id: impl Into<String>,
        connection_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            server_id: server_id.into(),
            connection_url: connection_url.into(),
            status: ConnectionStatus::Connecting,
            created_at: Utc::now(),
            last_ping: None,
            error_message: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }
}

/// A connection row left-joined with its server, as returned by listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub id: String,
    pub server_id: String,
    pub connection_url: String,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
    pub last_ping: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    /// `None` when the server reference dangles
    pub server_name: Option<String>,
    pub server_description: Option<String>,
}
