//! Per-server proxy contract
//!
//! Each server gets one long-lived proxy that holds its upstream MCP
//! registration. The proxy speaks the wire protocol; this crate only sees an
//! HTTP-like request/response surface. Handles are always re-resolved from
//! the server ID through a [`ProxyLocator`], never cached by callers.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Stable address of the proxy instance for one server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyAddress(String);

impl ProxyAddress {
    /// Derive the address for a server. Pure: same ID, same address.
    pub fn for_server(server_id: &str) -> Self {
        Self(format!("mcp-proxy:{}", server_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProxyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Requests understood by a server proxy.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyRequest {
    /// Register an upstream server (`POST /servers`)
    RegisterServer { name: String, url: String },
    /// List a registered server's tools (`GET /servers/{name}/tools`)
    ListTools { server_name: String },
    /// Invoke a tool (`POST /servers/{name}/tools/{tool}`)
    CallTool {
        server_name: String,
        tool_name: String,
        arguments: Value,
    },
}

impl ProxyRequest {
    pub fn register(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::RegisterServer {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn list_tools(server_name: impl Into<String>) -> Self {
        Self::ListTools {
            server_name: server_name.into(),
        }
    }

    pub fn call_tool(
        server_name: impl Into<String>,
        tool_name: impl Into<String>,
        arguments: Value,
    ) -> Self {
        Self::CallTool {
            server_name: server_name.into(),
            tool_name: tool_name.into(),
            arguments,
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::ListTools { .. } => "GET",
            Self::RegisterServer { .. } | Self::CallTool { .. } => "POST",
        }
    }

    /// Route path segments, unencoded.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::RegisterServer { .. } => vec!["servers"],
            Self::ListTools { server_name } => vec!["servers", server_name.as_str(), "tools"],
            Self::CallTool {
                server_name,
                tool_name,
                ..
            } => vec!["servers", server_name.as_str(), "tools", tool_name.as_str()],
        }
    }

    /// Route path for logging (segments joined verbatim).
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }

    pub fn body(&self) -> Option<Value> {
        match self {
            Self::RegisterServer { name, url } => Some(json!({ "name": name, "url": url })),
            Self::ListTools { .. } => None,
            Self::CallTool { arguments, .. } => Some(arguments.clone()),
        }
    }
}

/// Response from a server proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: Value,
}

impl ProxyResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "error": message.into() }))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human-readable reason for a failed response.
    pub fn error_detail(&self) -> String {
        match &self.body {
            Value::Object(map) => match map.get("error") {
                Some(Value::String(message)) => message.clone(),
                Some(other) => other.to_string(),
                None => format!("status {}", self.status),
            },
            Value::String(text) if !text.is_empty() => text.clone(),
            _ => format!("status {}", self.status),
        }
    }
}

/// A handle to one server's proxy.
///
/// `Err` means the proxy could not be reached; a reachable proxy reports
/// failures through a non-2xx [`ProxyResponse`].
#[async_trait]
pub trait ServerProxy: Send + Sync {
    async fn send(&self, request: ProxyRequest) -> anyhow::Result<ProxyResponse>;
}

/// Resolves server IDs to proxy handles.
///
/// Implementations must be deterministic: one server ID always resolves to
/// the same proxy instance and distinct IDs never share one.
pub trait ProxyLocator: Send + Sync {
    fn locate(&self, server_id: &str) -> Arc<dyn ServerProxy>;
}
