use std::sync::Arc;

use anyhow::{Context, Result};
use mcpconn_gateway::{
    logging, ConnectionManager, GatewayConfig, GatewayServer, HttpProxyFactory, ProxyRegistry,
};
use mcpconn_storage::{
    Database, SqliteConnectionRepository, SqliteServerRepository, SqliteToolRepository,
};
use tokio::sync::Mutex;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::from_env()?;
    let _guard = logging::init_tracing(config.log_dir.as_deref())?;

    info!("McpConn Gateway v{}", env!("CARGO_PKG_VERSION"));
    info!("Database: {:?}", config.database_path);

    let db = Database::open(&config.database_path).context("Failed to open database")?;
    let db = Arc::new(Mutex::new(db));

    let factory = HttpProxyFactory::new(&config.proxy_base_url, config.proxy_timeout)?;
    let manager = ConnectionManager::new(
        Arc::new(SqliteServerRepository::new(db.clone())),
        Arc::new(SqliteConnectionRepository::new(db.clone())),
        Arc::new(SqliteToolRepository::new(db)),
        Arc::new(ProxyRegistry::new(factory)),
    );

    GatewayServer::new(config, manager).run().await
}
