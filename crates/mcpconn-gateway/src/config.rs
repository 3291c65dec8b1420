//! Gateway configuration
//!
//! Defaults can be overridden from the environment (and a `.env` file):
//!
//! | Variable | Field |
//! |---|---|
//! | `MCPCONN_HOST` | `host` |
//! | `MCPCONN_PORT` | `port` |
//! | `MCPCONN_DATABASE` | `database_path` |
//! | `MCPCONN_PROXY_URL` | `proxy_base_url` |
//! | `MCPCONN_PROXY_TIMEOUT_SECS` | `proxy_timeout` |
//! | `MCPCONN_CORS` | `enable_cors` |
//! | `MCPCONN_LOG_DIR` | `log_dir` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

pub const DEFAULT_PORT: u16 = 45830;
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8787";
pub const DEFAULT_PROXY_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Base URL of the proxy host
    pub proxy_base_url: String,
    /// Per-request timeout for proxy relays
    pub proxy_timeout: Duration,
    /// Enable CORS for browser access
    pub enable_cors: bool,
    /// Write daily log files here when set
    pub log_dir: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            database_path: mcpconn_storage::default_database_path()
                .unwrap_or_else(|| PathBuf::from(mcpconn_storage::DATABASE_FILE)),
            proxy_base_url: DEFAULT_PROXY_URL.to_string(),
            proxy_timeout: DEFAULT_PROXY_TIMEOUT,
            enable_cors: true,
            log_dir: None,
        }
    }
}

impl GatewayConfig {
    /// Defaults overridden by `.env` and process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("MCPCONN_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("MCPCONN_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("Invalid MCPCONN_PORT: {}", port))?;
        }
        if let Some(path) = lookup("MCPCONN_DATABASE") {
            config.database_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("MCPCONN_PROXY_URL") {
            config.proxy_base_url = url;
        }
        if let Some(secs) = lookup("MCPCONN_PROXY_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("Invalid MCPCONN_PROXY_TIMEOUT_SECS: {}", secs))?;
            config.proxy_timeout = Duration::from_secs(secs);
        }
        if let Some(cors) = lookup("MCPCONN_CORS") {
            config.enable_cors = parse_flag(&cors)
                .with_context(|| format!("Invalid MCPCONN_CORS: {}", cors))?;
        }
        if let Some(dir) = lookup("MCPCONN_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Socket address to bind.
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }

    /// URL clients use to reach the gateway.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {:?}", other),
    }
}
