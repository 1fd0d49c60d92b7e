//! Index, template, alias and cluster tool tests.

use crate::common::{Call, MockStore, call, server_with};
use serde_json::{Value, json};

#[tokio::test]
async fn test_list_indices() {
    let store = MockStore::new().respond(
        "list_indices",
        json!([
            {"health": "green", "status": "open", "index": "books", "pri": "1", "rep": "1",
             "docs.count": "10", "store.size": "5kb"},
            {"health": "yellow", "status": "open", "index": "books-2", "pri": "2", "rep": "0",
             "docs.count": "0", "store.size": "225b"}
        ]),
    );
    let (server, store) = server_with(store);

    let result = call(&server, "list_indices", json!({"indexPattern": "books*"})).await;

    assert_eq!(result.content.len(), 2);
    assert_eq!(result.first_text(), Some("Found 2 indices"));
    let listed: Value = serde_json::from_str(result.content[1].as_text()).unwrap();
    assert_eq!(
        listed[1],
        json!({
            "index": "books-2",
            "health": "yellow",
            "status": "open",
            "docsCount": "0",
            "storeSize": "225b",
            "primaryShards": "2",
            "replicaShards": "0"
        })
    );
    assert_eq!(store.calls(), vec![Call::ListIndices("books*".to_string())]);
}

#[tokio::test]
async fn test_list_indices_requires_pattern() {
    let (server, store) = server_with(MockStore::new());
    let result = call(&server, "list_indices", json!({})).await;
    assert_eq!(
        result.first_text(),
        Some("Error: Invalid arguments for tool 'list_indices': Required argument 'indexPattern' is missing")
    );
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_get_mappings_unwraps_index_entry() {
    let store = MockStore::new().respond(
        "get_mapping",
        json!({"books": {"mappings": {"properties": {"title": {"type": "text"}}}}}),
    );
    let (server, _) = server_with(store);

    let result = call(&server, "get_mappings", json!({"index": "books"})).await;

    assert_eq!(result.first_text(), Some("Mappings for index: books"));
    let mappings: Value = serde_json::from_str(result.content[1].as_text()).unwrap();
    assert_eq!(mappings, json!({"properties": {"title": {"type": "text"}}}));
}

#[tokio::test]
async fn test_create_index_sends_only_given_sections() {
    let store = MockStore::new().respond(
        "create_index",
        json!({"acknowledged": true, "shards_acknowledged": true, "index": "logs"}),
    );
    let (server, store) = server_with(store);

    let result = call(
        &server,
        "create_index",
        json!({"index": "logs", "settings": {"number_of_shards": 1}}),
    )
    .await;

    assert_eq!(
        result.first_text(),
        Some("Index 'logs' created successfully (acknowledged: true)")
    );
    assert_eq!(
        store.calls(),
        vec![Call::CreateIndex {
            index: "logs".to_string(),
            body: json!({"settings": {"number_of_shards": 1}}),
        }]
    );
}

#[tokio::test]
async fn test_delete_index() {
    let store = MockStore::new().respond("delete_index", json!({"acknowledged": true}));
    let (server, store) = server_with(store);

    let result = call(&server, "delete_index", json!({"index": "logs"})).await;
    assert_eq!(result.first_text(), Some("Index 'logs' deleted successfully"));
    assert_eq!(store.calls(), vec![Call::DeleteIndex("logs".to_string())]);
}

#[tokio::test]
async fn test_get_templates() {
    let store = MockStore::new().respond(
        "get_index_templates",
        json!({"index_templates": [{
            "name": "logs",
            "index_template": {
                "index_patterns": ["logs-*"],
                "priority": 200,
                "template": {"settings": {"number_of_shards": "1"}},
                "composed_of": []
            }
        }]}),
    );
    let (server, store) = server_with(store);

    let result = call(&server, "get_templates", json!({"name": "logs"})).await;

    assert_eq!(result.first_text(), Some("Found 1 index templates"));
    let templates: Value = serde_json::from_str(result.content[1].as_text()).unwrap();
    assert_eq!(templates[0]["name"], "logs");
    assert_eq!(templates[0]["indexPatterns"], json!(["logs-*"]));
    assert_eq!(templates[0]["priority"], 200);
    assert_eq!(store.calls(), vec![Call::GetTemplates(Some("logs".to_string()))]);
}

#[tokio::test]
async fn test_get_aliases_flattens_per_index() {
    let store = MockStore::new().respond(
        "get_aliases",
        json!({
            "books-v1": {"aliases": {"books": {}}},
            "books-v2": {"aliases": {"books": {"is_write_index": true}, "latest": {}}},
            "scratch": {"aliases": {}}
        }),
    );
    let (server, store) = server_with(store);

    let result = call(&server, "get_aliases", json!({})).await;

    assert_eq!(result.first_text(), Some("Found 3 aliases"));
    let aliases: Value = serde_json::from_str(result.content[1].as_text()).unwrap();
    assert_eq!(
        aliases[1],
        json!({"alias": "books", "index": "books-v2", "properties": {"is_write_index": true}})
    );
    assert_eq!(store.calls(), vec![Call::GetAliases(None)]);
}

#[tokio::test]
async fn test_cluster_health() {
    let store = MockStore::new().respond(
        "cluster_health",
        json!({
            "cluster_name": "prod",
            "status": "green",
            "number_of_nodes": 3,
            "number_of_data_nodes": 2,
            "active_primary_shards": 5,
            "active_shards": 10,
            "relocating_shards": 0,
            "initializing_shards": 0,
            "unassigned_shards": 0,
            "number_of_pending_tasks": 1
        }),
    );
    let (server, _) = server_with(store);

    let result = call(&server, "get_cluster_health", json!(null)).await;

    let text = result.first_text().unwrap();
    assert!(text.contains("Cluster Name: prod"));
    assert!(text.contains("Status: green"));
    assert!(text.contains("Number of Data Nodes: 2"));
    assert!(text.contains("Pending Tasks: 1"));
}

#[tokio::test]
async fn test_get_shards() {
    let store = MockStore::new().respond(
        "cat_shards",
        json!([{
            "index": "books", "shard": "0", "prirep": "p", "state": "STARTED",
            "docs": "10", "store": "5kb", "ip": "10.0.0.1", "node": "node-1",
            "unassigned.reason": null
        }]),
    );
    let (server, store) = server_with(store);

    let result = call(&server, "get_shards", json!({"index": "books"})).await;

    assert_eq!(result.first_text(), Some("Found 1 shards for index books"));
    let shards: Value = serde_json::from_str(result.content[1].as_text()).unwrap();
    assert_eq!(
        shards[0],
        json!({
            "index": "books", "shard": "0", "prirep": "p", "state": "STARTED",
            "docs": "10", "store": "5kb", "ip": "10.0.0.1", "node": "node-1"
        })
    );
    assert_eq!(store.calls(), vec![Call::CatShards(Some("books".to_string()))]);

    let all = call(&server, "get_shards", json!({})).await;
    assert_eq!(all.first_text(), Some("Found 1 shards"));
}

#[tokio::test]
async fn test_blank_filters_mean_no_filter() {
    let store = MockStore::new().respond("cat_shards", json!([]));
    let (server, store) = server_with(store);

    let shards = call(&server, "get_shards", json!({"index": ""})).await;
    assert_eq!(shards.first_text(), Some("Found 0 shards"));
    call(&server, "get_templates", json!({"name": " "})).await;
    call(&server, "get_aliases", json!({"name": ""})).await;

    assert_eq!(
        store.calls(),
        vec![
            Call::CatShards(None),
            Call::GetTemplates(None),
            Call::GetAliases(None)
        ]
    );
}
