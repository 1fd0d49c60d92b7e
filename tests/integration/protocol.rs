//! MCP handler tests through the `rust-mcp-sdk` types.

use crate::common::{MockStore, server_with};
use elastic_mcp_server::ElasticMcpServer;
use elastic_mcp_server::mcp_integration::{
    ElasticMcpHandler, HandlerFuture, McpServerInfo, ToolDefinition, ToolRegistry, ToolResult,
};
use elastic_mcp_server::schema::{ArgumentSchema, Arguments};
use elastic_mcp_server::store::StoreClient;
use rust_mcp_sdk::schema::{CallToolRequestParams, CallToolResult};
use serde_json::{Value, json};

fn handler_with(store: MockStore) -> (ElasticMcpHandler<MockStore>, MockStore) {
    let (server, handle) = server_with(store);
    (ElasticMcpHandler::new(server), handle)
}

fn params(name: &str, arguments: Value) -> CallToolRequestParams {
    serde_json::from_value(json!({"name": name, "arguments": arguments}))
        .expect("valid tools/call params")
}

fn text_of(result: &CallToolResult, index: usize) -> String {
    result.content[index]
        .as_text_content()
        .expect("content should be text")
        .text
        .clone()
}

fn explode(_store: &dyn StoreClient, _args: Arguments) -> HandlerFuture<'_> {
    Box::pin(async move {
        let hits: Vec<String> = Vec::new();
        Ok(ToolResult::text(hits[0].clone()))
    })
}

#[test]
fn test_initialize_announces_tools_capability() {
    let (handler, _) = handler_with(MockStore::new());

    let details = handler.initialize_result();
    assert_eq!(details.server_info.name, "elasticsearch-mcp-server");
    assert_eq!(details.server_info.version, env!("CARGO_PKG_VERSION"));
    assert!(details.capabilities.tools.is_some());
}

#[test]
fn test_list_tools_publishes_catalogue_in_order() {
    let (handler, _) = handler_with(MockStore::new());

    let listed = handler.list_tools().unwrap();
    assert_eq!(listed.tools.len(), 16);
    assert_eq!(listed.tools[0].name, "list_indices");
    assert_eq!(listed.tools[15].name, "get_aliases");

    let wire = serde_json::to_value(&listed).unwrap();
    let tools = wire["tools"].as_array().unwrap();
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));

    let bulk = tools.iter().find(|t| t["name"] == "bulk").unwrap();
    assert_eq!(bulk["inputSchema"]["required"], json!(["operations"]));
}

#[tokio::test]
async fn test_call_tool_returns_text_content() {
    let store = MockStore::new().respond("count", json!({"count": 5}));
    let (handler, _) = handler_with(store);

    let result = handler
        .call_tool(params("count_documents", json!({"index": "books"})))
        .await
        .unwrap();

    assert_ne!(result.is_error, Some(true));
    assert_eq!(text_of(&result, 0), "Index 'books' contains 5 documents");
}

#[tokio::test]
async fn test_call_tool_marks_error_envelopes() {
    let (handler, store) = handler_with(MockStore::new());

    let result = handler
        .call_tool(params("count_documents", json!({})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text_of(&result, 0),
        "Error: Invalid arguments for tool 'count_documents': Required argument 'index' is missing"
    );
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_call_tool_without_arguments() {
    let store = MockStore::new().respond("cluster_health", json!({"status": "green"}));
    let (handler, _) = handler_with(store);

    let params: CallToolRequestParams =
        serde_json::from_value(json!({"name": "get_cluster_health"})).unwrap();
    let result = handler.call_tool(params).await.unwrap();

    assert_ne!(result.is_error, Some(true));
    assert!(text_of(&result, 0).contains("Status: green"));
}

#[tokio::test]
async fn test_unknown_tool_is_rejected() {
    let (handler, store) = handler_with(MockStore::new());

    let result = handler.call_tool(params("drop_cluster", json!({}))).await;

    assert!(result.is_err());
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_panicking_handler_still_answers() {
    let mut builder = ToolRegistry::builder();
    builder
        .register(ToolDefinition::new(
            "explode",
            "Fails with a handler bug",
            ArgumentSchema::empty(),
            explode,
        ))
        .unwrap();
    let server =
        ElasticMcpServer::with_registry(MockStore::new(), builder.build(), McpServerInfo::default());
    let handler = ElasticMcpHandler::new(server);

    let result = handler.call_tool(params("explode", json!({}))).await.unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text_of(&result, 0),
        "Error: Tool 'explode' terminated unexpectedly"
    );
}
