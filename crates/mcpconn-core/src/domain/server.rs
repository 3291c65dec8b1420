//! Server entity - a remote MCP-speaking endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A remote MCP server.
///
/// Servers are registered by an external process and never modified here.
/// The `name` is what the per-server proxy uses to address its routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Externally supplied identifier
    pub id: String,
    /// Human-readable name, also the proxy-facing route key
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// When the server was registered
    pub created_at: DateTime<Utc>,
}

impl Server {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
