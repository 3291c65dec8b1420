//! Operation result envelopes
//!
//! Every public lifecycle operation returns one of these. Failures are data:
//! `success: false` plus an `error` string, never a raised error.

use mcpconn_core::{ConnectionRecord, Tool, ToolDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of `connect`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectResult {
    pub fn connected(
        connection_id: impl Into<String>,
        tools: Vec<ToolDescriptor>,
        server_name: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            connection_id: Some(connection_id.into()),
            tools: Some(tools),
            server_name: Some(server_name.into()),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            connection_id: None,
            tools: None,
            server_name: None,
            error: Some(error.to_string()),
        }
    }
}

/// Result of `call_tool`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallToolResult {
    pub fn ok(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

/// Result of `list_connections`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListConnectionsResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<ConnectionRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ListConnectionsResult {
    pub fn ok(connections: Vec<ConnectionRecord>) -> Self {
        Self {
            success: true,
            connections: Some(connections),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            connections: None,
            error: Some(error.to_string()),
        }
    }
}

/// Result of `disconnect_from_server`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DisconnectResult {
    pub fn ok(connection_id: impl Into<String>) -> Self {
        Self {
            success: true,
            connection_id: Some(connection_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            connection_id: None,
            error: Some(error.to_string()),
        }
    }
}

/// Result of `get_server_tools`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerToolsResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerToolsResult {
    pub fn ok(tools: Vec<Tool>) -> Self {
        Self {
            success: true,
            tools: Some(tools),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            tools: None,
            error: Some(error.to_string()),
        }
    }
}
