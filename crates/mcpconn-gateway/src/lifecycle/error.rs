//! Lifecycle error taxonomy
//!
//! Display strings are part of the operation contract: callers receive them
//! verbatim in the `error` field of result envelopes.

use mcpconn_core::ConnectionStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Connection ID does not resolve to a row
    #[error("Connection not found")]
    ConnectionNotFound,

    /// Connection references a server row that does not exist
    #[error("Server not found")]
    ServerNotFound,

    /// Operation requires `connected` but the row is elsewhere
    #[error("Connection is {0}")]
    InvalidState(ConnectionStatus),

    /// Proxy rejected the upstream registration
    #[error("Failed to register server: {0}")]
    RegistrationFailed(String),

    /// Proxy returned non-success for a tool invocation
    #[error("Tool call failed")]
    ToolCallFailed,

    /// Discovery succeeded but the catalog body could not be decoded
    #[error("Invalid tool catalog: {0}")]
    InvalidCatalog(String),

    /// Proxy could not be reached
    #[error("Proxy request failed: {0}")]
    Upstream(String),

    /// Any persistence statement failed
    #[error("Storage error: {0}")]
    Store(#[from] anyhow::Error),
}

impl LifecycleError {
    pub fn upstream(err: anyhow::Error) -> Self {
        Self::Upstream(format!("{:#}", err))
    }
}
