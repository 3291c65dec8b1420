//! McpConn Gateway
//!
//! Connection lifecycle manager for remote MCP tool servers: records each
//! connection attempt, registers the server with its dedicated proxy,
//! caches the discovered tool catalog and relays tool calls.
//!
//! ```text
//! HTTP (axum) ──► ConnectionManager ──► repositories (SQLite)
//!                        │
//!                        └──► ProxyLocator ──► ServerProxy (one per server)
//! ```

pub mod config;
pub mod lifecycle;
pub mod logging;
pub mod proxy;
pub mod server;

pub use config::GatewayConfig;
pub use lifecycle::{
    CallToolResult, ConnectResult, ConnectionManager, DisconnectResult, LifecycleError,
    ListConnectionsResult, ServerToolsResult, ToolCatalogSync,
};
pub use proxy::{HttpProxyFactory, HttpServerProxy, ProxyFactory, ProxyRegistry};
pub use server::{build_router, GatewayServer};
