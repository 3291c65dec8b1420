//! HTTP handlers for the gateway server
//!
//! Every lifecycle route answers 200 with the operation's envelope; failures
//! are reported through `success: false`.

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::lifecycle::{
    CallToolResult, ConnectResult, ConnectionManager, DisconnectResult, ListConnectionsResult,
    ServerToolsResult,
};

#[derive(Clone)]
pub struct AppState {
    pub manager: ConnectionManager,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    debug!("[Gateway] Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Body of `POST /connections`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub server_id: String,
    pub server_url: String,
    pub server_name: String,
}

/// A body that does not decode into a `ConnectRequest` is reported as a
/// failed connect rather than a rejection.
pub async fn connect(State(state): State<AppState>, body: Bytes) -> Json<ConnectResult> {
    let request: ConnectRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return Json(ConnectResult::failed(format!("Invalid connect request: {}", e))),
    };

    Json(
        state
            .manager
            .connect(&request.server_id, &request.server_url, &request.server_name)
            .await,
    )
}

pub async fn list_connections(State(state): State<AppState>) -> Json<ListConnectionsResult> {
    Json(state.manager.list_connections().await)
}

pub async fn disconnect(
    State(state): State<AppState>,
    Path(connection_id): Path<String>,
) -> Json<DisconnectResult> {
    Json(state.manager.disconnect_from_server(&connection_id).await)
}

pub async fn server_tools(
    State(state): State<AppState>,
    Path(connection_id): Path<String>,
) -> Json<ServerToolsResult> {
    Json(state.manager.get_server_tools(&connection_id).await)
}

/// The raw body is the tool's argument document; an empty body means `{}`.
pub async fn call_tool(
    State(state): State<AppState>,
    Path((connection_id, tool_name)): Path<(String, String)>,
    body: Bytes,
) -> Json<CallToolResult> {
    let args = match parse_args(&body) {
        Ok(args) => args,
        Err(e) => return Json(CallToolResult::failed(format!("Invalid tool arguments: {}", e))),
    };

    Json(state.manager.call_tool(&connection_id, &tool_name, args).await)
}

fn parse_args(body: &[u8]) -> serde_json::Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
}
