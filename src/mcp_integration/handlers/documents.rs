//! Single-document handlers for MCP integration
//!
//! Document creation, partial update, deletion and counting. The store's
//! own document id is reported back verbatim so callers can address the
//! document in subsequent operations.

use crate::{
    error::ToolError, mcp_integration::core::ToolResult, schema::Arguments, store::StoreClient,
};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct AddDocumentArgs {
    index: String,
    document: Value,
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateDocumentArgs {
    index: String,
    id: String,
    document: Value,
}

#[derive(Debug, Deserialize)]
struct DeleteDocumentArgs {
    index: String,
    id: String,
}

#[derive(Debug, Deserialize)]
struct CountArgs {
    index: String,
    query: Option<Value>,
}

fn result_field(response: &Value) -> &str {
    response
        .get("result")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
}

/// Handle document creation through MCP
///
/// When no id is supplied the store assigns one; the reported id is always
/// the `_id` from the store's response.
pub async fn handle_add_document(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: AddDocumentArgs = args.parse()?;
    let response = store
        .index_document(&args.index, args.id.as_deref(), args.document)
        .await?;

    let id = response
        .get("_id")
        .and_then(Value::as_str)
        .or(args.id.as_deref())
        .unwrap_or("unknown");
    debug!("Indexed document '{}' into '{}'", id, args.index);

    Ok(ToolResult::text(format!(
        "Document added to index '{}' with ID: {} (result: {})",
        args.index,
        id,
        result_field(&response)
    )))
}

/// Handle partial document update through MCP
pub async fn handle_update_document(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: UpdateDocumentArgs = args.parse()?;
    let response = store
        .update_document(&args.index, &args.id, args.document)
        .await?;

    Ok(ToolResult::text(format!(
        "Document '{}' in index '{}' updated (result: {})",
        args.id,
        args.index,
        result_field(&response)
    )))
}

/// Handle document deletion through MCP
pub async fn handle_delete_document(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: DeleteDocumentArgs = args.parse()?;
    let response = store.delete_document(&args.index, &args.id).await?;

    Ok(ToolResult::text(format!(
        "Document '{}' deleted from index '{}' (result: {})",
        args.id,
        args.index,
        result_field(&response)
    )))
}

/// Handle document counting through MCP
pub async fn handle_count_documents(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: CountArgs = args.parse()?;
    let filtered = args.query.is_some();
    let response = store.count(&args.index, args.query).await?;

    let count = response.get("count").and_then(Value::as_u64).unwrap_or(0);
    let scope = if filtered { " matching the query" } else { "" };

    Ok(ToolResult::text(format!(
        "Index '{}' contains {} documents{}",
        args.index, count, scope
    )))
}
