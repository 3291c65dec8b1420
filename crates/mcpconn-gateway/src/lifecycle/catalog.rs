//! Tool catalog synchronizer
//!
//! Fetches a server's tool list through its proxy at connect time and
//! writes one row per discovered tool. Rows are additive: nothing is
//! reconciled against what an earlier connect stored.

use std::sync::Arc;

use mcpconn_core::{IdGenerator, ProxyRequest, ServerProxy, Tool, ToolDescriptor, ToolRepository};
use serde_json::Value;
use tracing::{debug, warn};

use super::LifecycleError;

#[derive(Clone)]
pub struct ToolCatalogSync {
    tools: Arc<dyn ToolRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl ToolCatalogSync {
    pub fn new(tools: Arc<dyn ToolRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { tools, ids }
    }

    /// Ask the proxy for the tools exposed by `server_name`.
    ///
    /// A non-success status yields an empty catalog. Transport failures and
    /// undecodable catalogs are errors.
    pub async fn discover(
        &self,
        proxy: &dyn ServerProxy,
        server_name: &str,
    ) -> Result<Vec<ToolDescriptor>, LifecycleError> {
        let response = proxy
            .send(ProxyRequest::list_tools(server_name))
            .await
            .map_err(LifecycleError::upstream)?;

        if !response.is_success() {
            warn!(
                server_name,
                status = response.status,
                detail = %response.error_detail(),
                "Tool discovery failed, continuing with empty catalog"
            );
            return Ok(Vec::new());
        }

        let tools = decode_catalog(&response.body)?;
        debug!(server_name, count = tools.len(), "Discovered tools");
        Ok(tools)
    }

    /// Insert one row per descriptor under `server_id`.
    pub async fn persist(
        &self,
        server_id: &str,
        descriptors: &[ToolDescriptor],
    ) -> Result<Vec<Tool>, LifecycleError> {
        let rows: Vec<Tool> = descriptors
            .iter()
            .map(|descriptor| Tool::from_descriptor(self.ids.generate(), server_id, descriptor))
            .collect();

        self.tools.insert_many(&rows).await?;
        Ok(rows)
    }
}

/// Decode `{tools: [...]}`. A missing or null `tools` field is an empty list.
pub fn decode_catalog(body: &Value) -> Result<Vec<ToolDescriptor>, LifecycleError> {
    match body.get("tools") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(tools) => serde_json::from_value(tools.clone())
            .map_err(|e| LifecycleError::InvalidCatalog(e.to_string())),
    }
}
