//! Connection lifecycle
//!
//! - [`ConnectionManager`] drives the connection state machine
//! - [`ToolCatalogSync`] fetches and stores tool catalogs
//! - result envelopes returned by every operation

mod catalog;
mod error;
mod manager;
mod results;

pub use catalog::{decode_catalog, ToolCatalogSync};
pub use error::LifecycleError;
pub use manager::ConnectionManager;
pub use results::{
    CallToolResult, ConnectResult, DisconnectResult, ListConnectionsResult, ServerToolsResult,
};
