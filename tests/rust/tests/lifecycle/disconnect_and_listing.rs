//! disconnect, list_connections and get_server_tools

use mcpconn_core::{ConnectionRepository, ConnectionStatus, CONNECTION_LIST_LIMIT};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{fixtures, LifecycleTestHarness, ProxyScript, Reply};

#[tokio::test]
async fn test_disconnect_is_idempotent() {
    let h = LifecycleTestHarness::new();
    let connection_id = h
        .manager
        .connect("srv1", "http://x", "toolserver")
        .await
        .connection_id
        .unwrap();

    for _ in 0..2 {
        let result = h.manager.disconnect_from_server(&connection_id).await;
        assert!(result.success);
        assert_eq!(result.connection_id.as_deref(), Some(connection_id.as_str()));
        assert!(result.error.is_none());
        assert_eq!(
            h.connection(&connection_id).await.status,
            ConnectionStatus::Disconnected
        );
    }
}

#[tokio::test]
async fn test_disconnect_does_not_contact_proxy() {
    let h = LifecycleTestHarness::new();
    let connection_id = h
        .manager
        .connect("srv1", "http://x", "toolserver")
        .await
        .connection_id
        .unwrap();
    let sent = h.proxy("srv1").unwrap().requests().len();

    h.manager.disconnect_from_server(&connection_id).await;

    assert_eq!(h.proxy("srv1").unwrap().requests().len(), sent);
    assert_eq!(h.factory().created(), 1);
}

#[tokio::test]
async fn test_disconnect_errored_row_keeps_message() {
    let h = LifecycleTestHarness::with_script(
        ProxyScript::default().with_register(Reply::status(502, "down")),
    );
    h.manager.connect("srv1", "http://x", "toolserver").await;

    let result = h.manager.disconnect_from_server("conn-1").await;

    assert!(result.success);
    let conn = h.connection("conn-1").await;
    assert_eq!(conn.status, ConnectionStatus::Disconnected);
    assert_eq!(conn.error_message.as_deref(), Some("Failed to register server: down"));
}

#[tokio::test]
async fn test_disconnect_unknown_id_succeeds() {
    let h = LifecycleTestHarness::new();

    let result = h.manager.disconnect_from_server("nope").await;

    assert!(result.success);
    assert_eq!(result.connection_id.as_deref(), Some("nope"));
}

#[tokio::test]
async fn test_list_connections_newest_first_with_server_names() {
    let h = LifecycleTestHarness::new();
    h.add_server("srv1", "toolserver").await;

    for url in ["http://a", "http://b", "http://c"] {
        assert!(h.manager.connect("srv1", url, "toolserver").await.success);
    }
    h.manager.connect("ghost", "http://d", "ghostserver").await;

    let result = h.manager.list_connections().await;
    assert!(result.success);
    let rows = result.connections.unwrap();

    assert_eq!(
        rows.iter().map(|r| r.connection_url.as_str()).collect::<Vec<_>>(),
        vec!["http://d", "http://c", "http://b", "http://a"]
    );
    assert_eq!(rows[0].server_name, None);
    assert!(rows[1..]
        .iter()
        .all(|r| r.server_name.as_deref() == Some("toolserver")));
    assert!(rows
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}

#[tokio::test]
async fn test_list_connections_is_capped() {
    let h = LifecycleTestHarness::new();
    for i in 0..(CONNECTION_LIST_LIMIT + 3) {
        h.connections
            .create(&fixtures::test_connection(
                &format!("bulk-{:03}", i),
                "srv1",
                "http://x",
                i as i64,
            ))
            .await
            .unwrap();
    }

    let rows = h.manager.list_connections().await.connections.unwrap();

    assert_eq!(rows.len(), CONNECTION_LIST_LIMIT);
    assert_eq!(rows[0].id, "bulk-102");
}

#[tokio::test]
async fn test_list_connections_record_shape() {
    let h = LifecycleTestHarness::new();
    h.add_server("srv1", "toolserver").await;
    h.manager.connect("srv1", "http://x", "toolserver").await;

    let value = serde_json::to_value(h.manager.list_connections().await).unwrap();
    let row = &value["connections"][0];

    assert_eq!(value["success"], json!(true));
    assert_eq!(row["id"], json!("conn-1"));
    assert_eq!(row["server_id"], json!("srv1"));
    assert_eq!(row["connection_url"], json!("http://x"));
    assert_eq!(row["status"], json!("connected"));
    assert_eq!(row["server_name"], json!("toolserver"));
}

#[tokio::test]
async fn test_server_tools_ignore_status_and_accumulate() {
    let h = LifecycleTestHarness::with_script(
        ProxyScript::default().with_tools(vec![fixtures::listed_tool("a"), fixtures::listed_tool("b")]),
    );

    let first = h
        .manager
        .connect("srv1", "http://x", "toolserver")
        .await
        .connection_id
        .unwrap();
    h.manager.disconnect_from_server(&first).await;
    h.manager.connect("srv1", "http://x", "toolserver").await;
    let sent = h.proxy("srv1").unwrap().requests().len();

    let tools = h.manager.get_server_tools(&first).await;

    assert!(tools.success);
    let names: Vec<String> = tools.tools.unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["a", "b", "a", "b"]);
    assert_eq!(h.proxy("srv1").unwrap().requests().len(), sent);
}

#[tokio::test]
async fn test_server_tools_unknown_connection() {
    let h = LifecycleTestHarness::new();

    let result = h.manager.get_server_tools("missing").await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "success": false, "error": "Connection not found" })
    );
}
