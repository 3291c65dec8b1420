//! Server and tool repository tests

use mcpconn_core::{ServerRepository, Tool, ToolDescriptor, ToolRepository};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{db::TestDatabase, fixtures};

#[tokio::test]
async fn test_server_create_and_get() {
    let test_db = TestDatabase::new();
    let repo = test_db.servers();

    let server = fixtures::test_server("srv1", "toolserver");
    repo.create(&server).await.expect("Failed to create server");

    let loaded = repo.get("srv1").await.unwrap().expect("server should exist");
    assert_eq!(loaded.id, "srv1");
    assert_eq!(loaded.name, "toolserver");
    assert_eq!(loaded.description, server.description);
    assert_eq!(
        loaded.created_at.timestamp_micros(),
        server.created_at.timestamp_micros()
    );
    assert!(repo.get("srv2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_list() {
    let test_db = TestDatabase::in_memory();
    let repo = test_db.servers();

    repo.create(&fixtures::test_server("a", "alpha")).await.unwrap();
    repo.create(&fixtures::test_server("b", "beta")).await.unwrap();

    let names: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[tokio::test]
async fn test_tool_rows_round_trip_schema() {
    let test_db = TestDatabase::new();
    let repo = test_db.tools();

    let tool = fixtures::test_tool("t1", "srv1", "search");
    repo.insert(&tool).await.unwrap();

    let loaded = repo.list_for_server("srv1").await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, tool.id);
    assert_eq!(loaded[0].description, "Test tool: search");
    assert_eq!(loaded[0].input_schema, tool.input_schema);
    assert_eq!(
        loaded[0].input_schema["properties"]["query"]["type"],
        json!("string")
    );
}

#[tokio::test]
async fn test_tool_defaults_for_sparse_descriptor() {
    let test_db = TestDatabase::in_memory();
    let repo = test_db.tools();

    let tool = Tool::from_descriptor("t1", "srv1", &ToolDescriptor::new("bare"));
    repo.insert(&tool).await.unwrap();

    let loaded = repo.list_for_server("srv1").await.unwrap();
    assert_eq!(loaded[0].description, "");
    assert_eq!(loaded[0].input_schema, json!({}));
}

#[tokio::test]
async fn test_tool_rows_are_additive() {
    let test_db = TestDatabase::in_memory();
    let repo = test_db.tools();

    repo.insert_many(&[
        fixtures::test_tool("t1", "srv1", "a"),
        fixtures::test_tool("t2", "srv1", "b"),
    ])
    .await
    .unwrap();
    repo.insert_many(&[
        fixtures::test_tool("t3", "srv1", "a"),
        fixtures::test_tool("t4", "srv2", "a"),
    ])
    .await
    .unwrap();

    let names: Vec<String> = repo
        .list_for_server("srv1")
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["a", "b", "a"]);
    assert_eq!(repo.list_for_server("srv2").await.unwrap().len(), 1);
    assert!(repo.list_for_server("srv3").await.unwrap().is_empty());
}
