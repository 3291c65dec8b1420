//! Test service builders and helpers

use std::sync::Arc;

use mcpconn_core::{Connection, ConnectionRepository, ServerRepository, ToolRepository};
use mcpconn_gateway::{ConnectionManager, ProxyRegistry};
use mcpconn_storage::{SqliteServerRepository, SqliteToolRepository};

use crate::db::TestDatabase;
use crate::fixtures;
use crate::mocks::{
    CountingProxyFactory, FlakyConnectionRepository, ProxyScript, ScriptedProxy,
    SequentialIdGenerator,
};

/// Test harness for ConnectionManager
///
/// Wires an in-memory database, a scripted proxy registry and sequential
/// identifiers (`conn-1`, `conn-2`, ...; tool rows draw from the same
/// sequence).
pub struct LifecycleTestHarness {
    /// The manager under test
    pub manager: ConnectionManager,

    pub database: TestDatabase,
    pub servers: Arc<SqliteServerRepository>,
    pub connections: Arc<FlakyConnectionRepository>,
    pub tools: Arc<SqliteToolRepository>,
    pub registry: Arc<ProxyRegistry<CountingProxyFactory>>,
}

impl LifecycleTestHarness {
    /// Harness with the default (always successful, no tools) proxy script
    pub fn new() -> Self {
        Self::with_script(ProxyScript::default())
    }

    pub fn with_script(script: ProxyScript) -> Self {
        crate::init_test_tracing();

        let database = TestDatabase::in_memory();
        let servers = Arc::new(database.servers());
        let connections = Arc::new(FlakyConnectionRepository::new(Arc::new(
            database.connections(),
        )));
        let tools = Arc::new(database.tools());
        let registry = Arc::new(ProxyRegistry::new(CountingProxyFactory::new(script)));

        let manager = ConnectionManager::new(
            servers.clone(),
            connections.clone(),
            tools.clone(),
            registry.clone(),
        )
        .with_id_generator(Arc::new(SequentialIdGenerator::new("conn")));

        Self {
            manager,
            database,
            servers,
            connections,
            tools,
            registry,
        }
    }

    /// Register a server row
    pub async fn add_server(&self, id: &str, name: &str) {
        self.servers
            .create(&fixtures::test_server(id, name))
            .await
            .expect("Failed to create server");
    }

    pub fn factory(&self) -> &CountingProxyFactory {
        self.registry.factory()
    }

    pub fn set_script(&self, script: ProxyScript) {
        self.factory().set_script(script);
    }

    /// The proxy built for a server, if anything addressed it yet
    pub fn proxy(&self, server_id: &str) -> Option<Arc<ScriptedProxy>> {
        self.factory().proxy_for(server_id)
    }

    /// Load a connection row, panicking when absent
    pub async fn connection(&self, id: &str) -> Connection {
        self.connections
            .get(id)
            .await
            .expect("Failed to load connection")
            .unwrap_or_else(|| panic!("connection {} not found", id))
    }

    pub async fn tool_count(&self, server_id: &str) -> usize {
        self.tools
            .list_for_server(server_id)
            .await
            .expect("Failed to list tools")
            .len()
    }
}

impl Default for LifecycleTestHarness {
    fn default() -> Self {
        Self::new()
    }
}
