//! Connection Manager - the connection lifecycle state machine
//!
//! The manager keeps no in-memory state: every operation reads and writes
//! the record store and re-resolves the server's proxy through the locator.
//! Each public operation turns its failures into a result envelope.
//!
//! Connect sequence:
//! 1. insert a `connecting` row
//! 2. locate the server's proxy
//! 3. register the upstream server (non-success is fatal)
//! 4. discover tools (non-success degrades to an empty catalog)
//! 5. mark the row `connected`
//! 6. insert discovered tool rows

use std::sync::Arc;

use chrono::Utc;
use mcpconn_core::{
    Connection, ConnectionRepository, ConnectionStatus, IdGenerator, ProxyLocator, ProxyRequest,
    ServerRepository, Tool, ToolDescriptor, ToolRepository, UuidIdGenerator, CONNECTION_LIST_LIMIT,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{
    CallToolResult, ConnectResult, DisconnectResult, LifecycleError, ListConnectionsResult,
    ServerToolsResult, ToolCatalogSync,
};

#[derive(Clone)]
pub struct ConnectionManager {
    servers: Arc<dyn ServerRepository>,
    connections: Arc<dyn ConnectionRepository>,
    tools: Arc<dyn ToolRepository>,
    proxies: Arc<dyn ProxyLocator>,
    ids: Arc<dyn IdGenerator>,
    catalog: ToolCatalogSync,
}

impl ConnectionManager {
    pub fn new(
        servers: Arc<dyn ServerRepository>,
        connections: Arc<dyn ConnectionRepository>,
        tools: Arc<dyn ToolRepository>,
        proxies: Arc<dyn ProxyLocator>,
    ) -> Self {
        let ids: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator);
        Self {
            catalog: ToolCatalogSync::new(tools.clone(), ids.clone()),
            servers,
            connections,
            tools,
            proxies,
            ids,
        }
    }

    /// Replace the identifier source for connection and tool rows.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.catalog = ToolCatalogSync::new(self.tools.clone(), ids.clone());
        self.ids = ids;
        self
    }

    /// Open a new connection to a server and cache its tool catalog.
    pub async fn connect(
        &self,
        server_id: &str,
        server_url: &str,
        server_name: &str,
    ) -> ConnectResult {
        let connection = Connection::connecting(self.ids.generate(), server_id, server_url);
        info!(
            connection_id = %connection.id,
            server_id,
            server_name,
            "Connecting to server"
        );

        // No row exists yet, so there is nothing to mark as errored
        if let Err(e) = self.connections.create(&connection).await {
            let err = LifecycleError::from(e);
            warn!(server_id, error = %err, "Failed to record connection attempt");
            return ConnectResult::failed(err);
        }

        match self.establish(&connection, server_name).await {
            Ok(tools) => {
                info!(
                    connection_id = %connection.id,
                    server_id,
                    tools = tools.len(),
                    "Connected"
                );
                ConnectResult::connected(connection.id, tools, server_name)
            }
            Err(err) => {
                let message = err.to_string();
                warn!(
                    connection_id = %connection.id,
                    server_id,
                    error = %message,
                    "Connection attempt failed"
                );

                if let Err(mark_err) = self
                    .connections
                    .mark_error_for_server_url(server_id, server_url, &message)
                    .await
                {
                    error!(
                        connection_id = %connection.id,
                        server_id,
                        "Failed to mark connection as errored: {:#}",
                        mark_err
                    );
                }

                ConnectResult::failed(message)
            }
        }
    }

    async fn establish(
        &self,
        connection: &Connection,
        server_name: &str,
    ) -> Result<Vec<ToolDescriptor>, LifecycleError> {
        let proxy = self.proxies.locate(&connection.server_id);

        let response = proxy
            .send(ProxyRequest::register(server_name, connection.connection_url.as_str()))
            .await
            .map_err(LifecycleError::upstream)?;
        if !response.is_success() {
            return Err(LifecycleError::RegistrationFailed(response.error_detail()));
        }
        debug!(server_id = %connection.server_id, server_name, "Registered upstream server");

        let tools = self.catalog.discover(proxy.as_ref(), server_name).await?;

        self.connections
            .mark_connected(&connection.id, Utc::now())
            .await?;

        self.catalog.persist(&connection.server_id, &tools).await?;

        Ok(tools)
    }

    /// Invoke a tool through the connection's server proxy.
    ///
    /// The connection must be `connected`. The proxy's result body is
    /// returned untouched.
    pub async fn call_tool(
        &self,
        connection_id: &str,
        tool_name: &str,
        args: Value,
    ) -> CallToolResult {
        match self.invoke(connection_id, tool_name, args).await {
            Ok(result) => CallToolResult::ok(result),
            Err(err) => {
                warn!(connection_id, tool = tool_name, error = %err, "Tool call failed");
                CallToolResult::failed(err)
            }
        }
    }

    async fn invoke(
        &self,
        connection_id: &str,
        tool_name: &str,
        args: Value,
    ) -> Result<Value, LifecycleError> {
        let connection = self
            .connections
            .get(connection_id)
            .await?
            .ok_or(LifecycleError::ConnectionNotFound)?;

        if !connection.is_connected() {
            return Err(LifecycleError::InvalidState(connection.status));
        }

        let server = self
            .servers
            .get(&connection.server_id)
            .await?
            .ok_or(LifecycleError::ServerNotFound)?;

        let proxy = self.proxies.locate(&connection.server_id);
        debug!(connection_id, server_name = %server.name, tool = tool_name, "Calling tool");

        let response = proxy
            .send(ProxyRequest::call_tool(server.name, tool_name, args))
            .await
            .map_err(LifecycleError::upstream)?;
        if !response.is_success() {
            debug!(
                connection_id,
                tool = tool_name,
                status = response.status,
                detail = %response.error_detail(),
                "Proxy rejected tool call"
            );
            return Err(LifecycleError::ToolCallFailed);
        }

        self.connections.touch(connection_id, Utc::now()).await?;

        Ok(response.body)
    }

    /// The most recent connections, newest first.
    pub async fn list_connections(&self) -> ListConnectionsResult {
        match self.connections.list_recent(CONNECTION_LIST_LIMIT).await {
            Ok(connections) => ListConnectionsResult::ok(connections),
            Err(e) => {
                let err = LifecycleError::from(e);
                warn!(error = %err, "Failed to list connections");
                ListConnectionsResult::failed(err)
            }
        }
    }

    /// Mark a connection `disconnected`. Idempotent; the proxy is untouched.
    pub async fn disconnect_from_server(&self, connection_id: &str) -> DisconnectResult {
        match self
            .connections
            .set_status(connection_id, ConnectionStatus::Disconnected)
            .await
        {
            Ok(()) => {
                info!(connection_id, "Disconnected");
                DisconnectResult::ok(connection_id)
            }
            Err(e) => {
                let err = LifecycleError::from(e);
                warn!(connection_id, error = %err, "Failed to disconnect");
                DisconnectResult::failed(err)
            }
        }
    }

    /// Cached tool rows for the connection's server. Never contacts the proxy.
    pub async fn get_server_tools(&self, connection_id: &str) -> ServerToolsResult {
        match self.load_tools(connection_id).await {
            Ok(tools) => ServerToolsResult::ok(tools),
            Err(err) => {
                warn!(connection_id, error = %err, "Failed to load server tools");
                ServerToolsResult::failed(err)
            }
        }
    }

    async fn load_tools(&self, connection_id: &str) -> Result<Vec<Tool>, LifecycleError> {
        let connection = self
            .connections
            .get(connection_id)
            .await?
            .ok_or(LifecycleError::ConnectionNotFound)?;

        Ok(self.tools.list_for_server(&connection.server_id).await?)
    }
}
