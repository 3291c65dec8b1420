//! Gateway Server
//!
//! HTTP surface over the connection lifecycle operations.

mod handlers;

pub use handlers::{AppState, ConnectRequest, HealthResponse};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::GatewayConfig;
use crate::lifecycle::ConnectionManager;

/// Build the Axum router
pub fn build_router(manager: ConnectionManager, enable_cors: bool) -> Router {
    let app_state = AppState { manager };

    let router = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/connections",
            get(handlers::list_connections).post(handlers::connect),
        )
        .route(
            "/connections/{connection_id}/disconnect",
            post(handlers::disconnect),
        )
        .route(
            "/connections/{connection_id}/tools",
            get(handlers::server_tools),
        )
        .route(
            "/connections/{connection_id}/tools/{tool_name}",
            post(handlers::call_tool),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}

/// Connection gateway server
pub struct GatewayServer {
    config: GatewayConfig,
    manager: ConnectionManager,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, manager: ConnectionManager) -> Self {
        Self { config, manager }
    }

    pub fn router(&self) -> Router {
        build_router(self.manager.clone(), self.config.enable_cors)
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.addr()?;

        info!("[Gateway] Starting on {}", self.config.base_url());
        info!(
            "[Gateway] CORS: {}",
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );
        info!("[Gateway] Proxy host: {}", self.config.proxy_base_url);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("[Gateway] Stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("[Gateway] Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("[Gateway] Shutdown signal received");
}
