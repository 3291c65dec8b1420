//! Tool entity - a capability discovered from a server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool as reported by the proxy's discovery endpoint.
///
/// Schemas are opaque, server-defined JSON and are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// A persisted tool row.
///
/// Rows are additive: repeated connects to the same server insert new rows
/// instead of reconciling, so duplicates per (server, name) are expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub server_id: String,
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub created_at: DateTime<Utc>,
}

impl Tool {
    /// Build a row from a discovered descriptor.
    ///
    /// Missing description becomes `""`, missing schema becomes `{}`.
    pub fn from_descriptor(
        id: impl Into<String>,
        server_id: impl Into<String>,
        descriptor: &ToolDescriptor,
    ) -> Self {
        Self {
            id: id.into(),
            server_id: server_id.into(),
            name: descriptor.name.clone(),
            description: descriptor.description.clone().unwrap_or_default(),
            input_schema: descriptor
                .input_schema
                .clone()
                .unwrap_or_else(|| Value::Object(Default::default())),
            created_at: Utc::now(),
        }
    }
}
