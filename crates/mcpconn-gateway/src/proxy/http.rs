//! HTTP relay to the proxy host
//!
//! Proxy actors live behind a single HTTP host. A request for address `A`
//! and route `/servers/x/tools` goes to `{base}/proxies/A/servers/x/tools`,
//! with every segment percent-encoded.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use mcpconn_core::{ProxyAddress, ProxyRequest, ProxyResponse, ServerProxy};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::ProxyFactory;

/// `ServerProxy` backed by the proxy host's HTTP surface
pub struct HttpServerProxy {
    address: ProxyAddress,
    base_url: Url,
    client: reqwest::Client,
}

impl HttpServerProxy {
    pub fn new(address: ProxyAddress, base_url: Url, client: reqwest::Client) -> Self {
        Self {
            address,
            base_url,
            client,
        }
    }

    /// Full URL for a request routed through this proxy.
    pub fn request_url(&self, request: &ProxyRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("Proxy base URL cannot be a base: {}", self.base_url))?;
            segments.pop_if_empty();
            segments.push("proxies");
            segments.push(self.address.as_str());
            segments.extend(request.segments());
        }
        Ok(url)
    }
}

#[async_trait]
impl ServerProxy for HttpServerProxy {
    async fn send(&self, request: ProxyRequest) -> Result<ProxyResponse> {
        let url = self.request_url(&request)?;
        debug!(
            address = %self.address,
            method = request.method(),
            path = %request.path(),
            "Relaying proxy request"
        );

        let builder = match request.method() {
            "GET" => self.client.get(url),
            _ => self.client.post(url),
        };
        let builder = match request.body() {
            Some(body) => builder.json(&body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .with_context(|| format!("Failed to reach proxy {}", self.address))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from proxy {}", self.address))?;

        if !status.is_success() {
            warn!(address = %self.address, status = status.as_u16(), "Proxy returned error status");
        }

        Ok(ProxyResponse::new(status.as_u16(), parse_body(&text)))
    }
}

/// Non-JSON bodies are kept as a string so error details survive.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Creates `HttpServerProxy` handles sharing one HTTP client
#[derive(Clone)]
pub struct HttpProxyFactory {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpProxyFactory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid proxy base URL: {}", base_url))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("McpConn/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url, client })
    }
}

impl ProxyFactory for HttpProxyFactory {
    fn create(&self, address: &ProxyAddress) -> Arc<dyn ServerProxy> {
        Arc::new(HttpServerProxy::new(
            address.clone(),
            self.base_url.clone(),
            self.client.clone(),
        ))
    }
}
