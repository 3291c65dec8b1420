//! connect: state transitions, catalog sync and failure marking

use mcpconn_core::{ConnectionStatus, ProxyRequest};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{fixtures, LifecycleTestHarness, ProxyScript, Reply};

fn two_tool_script() -> ProxyScript {
    ProxyScript::default().with_tools(vec![fixtures::listed_tool("a"), fixtures::listed_tool("b")])
}

#[tokio::test]
async fn test_connect_discovers_and_stores_tools() {
    let h = LifecycleTestHarness::with_script(two_tool_script());
    h.add_server("srv1", "toolserver").await;

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;

    assert!(result.success, "connect failed: {:?}", result.error);
    assert_eq!(result.server_name.as_deref(), Some("toolserver"));
    let tools = result.tools.expect("tools");
    assert_eq!(
        tools.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["a", "b"]
    );

    let connection_id = result.connection_id.expect("connection id");
    let connection = h.connection(&connection_id).await;
    assert_eq!(connection.status, ConnectionStatus::Connected);
    assert!(connection.last_ping.is_some());
    assert!(connection.error_message.is_none());

    let stored = h.manager.get_server_tools(&connection_id).await;
    assert!(stored.success);
    let stored = stored.tools.expect("tools");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|t| t.server_id == "srv1"));
    assert_eq!(stored[0].name, "a");
    assert_eq!(stored[0].description, "Tool a");
    assert_eq!(stored[1].input_schema, json!({ "type": "object" }));
}

#[tokio::test]
async fn test_connect_talks_to_proxy_by_server_name() {
    let h = LifecycleTestHarness::new();

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;
    assert!(result.success);

    let proxy = h.proxy("srv1").expect("proxy for srv1");
    assert_eq!(proxy.address().as_str(), "mcp-proxy:srv1");
    assert_eq!(
        proxy.requests(),
        vec![
            ProxyRequest::register("toolserver", "http://x"),
            ProxyRequest::list_tools("toolserver"),
        ]
    );
}

#[tokio::test]
async fn test_connect_does_not_require_server_row() {
    let h = LifecycleTestHarness::new();

    let result = h.manager.connect("unregistered", "http://x", "toolserver").await;

    assert!(result.success);
    assert_eq!(result.tools, Some(vec![]));
}

#[tokio::test]
async fn test_registration_rejected_marks_error() {
    let h = LifecycleTestHarness::with_script(
        two_tool_script().with_register(Reply::status(502, "upstream refused")),
    );
    h.add_server("srv1", "toolserver").await;

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;

    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("Failed to register server: upstream refused")
    );
    assert!(result.connection_id.is_none());

    let listed = h.manager.list_connections().await.connections.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, ConnectionStatus::Error);
    assert!(!listed[0].error_message.as_deref().unwrap_or("").is_empty());
    assert!(listed[0].last_ping.is_none());

    // Registration failure stops before discovery
    let proxy = h.proxy("srv1").unwrap();
    assert_eq!(proxy.requests().len(), 1);
    assert_eq!(h.tool_count("srv1").await, 0);
}

#[tokio::test]
async fn test_unreachable_proxy_marks_error() {
    let h = LifecycleTestHarness::with_script(
        ProxyScript::default().with_register(Reply::Unreachable("connection refused".into())),
    );

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;

    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("Proxy request failed: connection refused")
    );
    let conn = h.connection("conn-1").await;
    assert_eq!(conn.status, ConnectionStatus::Error);
    assert_eq!(
        conn.error_message.as_deref(),
        Some("Proxy request failed: connection refused")
    );
}

#[tokio::test]
async fn test_discovery_failure_degrades_to_empty_catalog() {
    let h = LifecycleTestHarness::with_script(
        ProxyScript::default().with_list_tools(Reply::status(500, "listing broke")),
    );

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;

    assert!(result.success);
    assert_eq!(result.tools, Some(vec![]));
    let conn = h.connection(&result.connection_id.unwrap()).await;
    assert_eq!(conn.status, ConnectionStatus::Connected);
    assert_eq!(h.tool_count("srv1").await, 0);
}

#[tokio::test]
async fn test_catalog_without_tools_field_is_empty() {
    let h = LifecycleTestHarness::with_script(
        ProxyScript::default().with_list_tools(Reply::ok(json!({ "server": "toolserver" }))),
    );

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;

    assert!(result.success);
    assert_eq!(result.tools, Some(vec![]));
}

#[tokio::test]
async fn test_malformed_catalog_fails_connect() {
    let h = LifecycleTestHarness::with_script(
        ProxyScript::default().with_list_tools(Reply::ok(json!({ "tools": [{ "title": "x" }] }))),
    );

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;

    assert!(!result.success);
    assert!(result
        .error
        .as_deref()
        .unwrap_or("")
        .starts_with("Invalid tool catalog"));
    assert_eq!(h.connection("conn-1").await.status, ConnectionStatus::Error);
}

#[tokio::test]
async fn test_discovery_transport_failure_fails_connect() {
    let h = LifecycleTestHarness::with_script(
        ProxyScript::default().with_list_tools(Reply::Unreachable("timed out".into())),
    );

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Proxy request failed: timed out"));
    assert_eq!(h.connection("conn-1").await.status, ConnectionStatus::Error);
}

#[tokio::test]
async fn test_sparse_descriptors_get_defaults() {
    let h = LifecycleTestHarness::with_script(
        ProxyScript::default().with_tools(vec![json!({ "name": "bare" })]),
    );

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;
    assert!(result.success);

    let stored = h
        .manager
        .get_server_tools(&result.connection_id.unwrap())
        .await
        .tools
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].description, "");
    assert_eq!(stored[0].input_schema, json!({}));
}

#[tokio::test]
async fn test_failed_insert_skips_error_marking() {
    let h = LifecycleTestHarness::new();
    h.connections.fail_create(true);

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Storage error: database is locked"));
    assert_eq!(h.connections.mark_error_calls(), 0);
    assert_eq!(h.factory().created(), 0, "proxy must not be contacted");
    assert!(h.manager.list_connections().await.connections.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_failure_after_registration_marks_error() {
    let h = LifecycleTestHarness::with_script(two_tool_script());
    h.connections.fail_mark_connected(true);

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Storage error: disk I/O error"));
    assert_eq!(h.connections.mark_error_calls(), 1);

    let conn = h.connection("conn-1").await;
    assert_eq!(conn.status, ConnectionStatus::Error);
    assert_eq!(conn.error_message.as_deref(), Some("Storage error: disk I/O error"));
    assert_eq!(h.tool_count("srv1").await, 0);
}

#[tokio::test]
async fn test_failed_error_marking_keeps_original_error() {
    let h = LifecycleTestHarness::with_script(
        ProxyScript::default().with_register(Reply::status(503, "busy")),
    );
    h.connections.fail_mark_error(true);

    let result = h.manager.connect("srv1", "http://x", "toolserver").await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Failed to register server: busy"));
    assert_eq!(h.connections.mark_error_calls(), 1);
    assert_eq!(
        h.connection("conn-1").await.status,
        ConnectionStatus::Connecting
    );
}

#[tokio::test]
async fn test_connect_result_wire_shape() {
    let h = LifecycleTestHarness::with_script(
        ProxyScript::default().with_tools(vec![json!({ "name": "a" })]),
    );

    let ok = serde_json::to_value(h.manager.connect("srv1", "http://x", "toolserver").await).unwrap();
    assert_eq!(
        ok,
        json!({
            "success": true,
            "connectionId": "conn-1",
            "tools": [{ "name": "a" }],
            "serverName": "toolserver"
        })
    );

    h.set_script(ProxyScript::default().with_register(Reply::status(400, "bad url")));
    let failed =
        serde_json::to_value(h.manager.connect("srv1", "http://x", "toolserver").await).unwrap();
    assert_eq!(
        failed,
        json!({ "success": false, "error": "Failed to register server: bad url" })
    );
}
