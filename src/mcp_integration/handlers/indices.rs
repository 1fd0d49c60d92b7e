//! Index-level handlers for MCP integration

use super::{filter_arg, pretty};
use crate::{
    error::ToolError, mcp_integration::core::ToolResult, schema::Arguments, store::StoreClient,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListIndicesArgs {
    index_pattern: String,
}

#[derive(Debug, Deserialize)]
struct IndexArgs {
    index: String,
}

#[derive(Debug, Deserialize)]
struct CreateIndexArgs {
    index: String,
    settings: Option<Value>,
    mappings: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct NameFilterArgs {
    name: Option<String>,
}

/// One row of `_cat/indices` as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSummary {
    pub index: String,
    pub health: String,
    pub status: String,
    pub docs_count: String,
    pub store_size: String,
    pub primary_shards: String,
    pub replica_shards: String,
}

impl IndexSummary {
    /// Read a `_cat/indices` row. Missing columns read as empty strings.
    pub fn from_cat_row(row: &Value) -> Self {
        let column = |name: &str| match row.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Self {
            index: column("index"),
            health: column("health"),
            status: column("status"),
            docs_count: column("docs.count"),
            store_size: column("store.size"),
            primary_shards: column("pri"),
            replica_shards: column("rep"),
        }
    }
}

/// Handle index listing through MCP
pub async fn handle_list_indices(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: ListIndicesArgs = args.parse()?;
    let response = store.list_indices(&args.index_pattern).await?;

    let indices: Vec<IndexSummary> = response
        .as_array()
        .map(|rows| rows.iter().map(IndexSummary::from_cat_row).collect())
        .unwrap_or_default();

    Ok(ToolResult::text(format!("Found {} indices", indices.len()))
        .with_text(serde_json::to_string_pretty(&indices)?))
}

/// Handle mapping retrieval through MCP
pub async fn handle_get_mappings(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: IndexArgs = args.parse()?;
    let response = store.get_mapping(&args.index).await?;

    let mappings = response
        .get(&args.index)
        .and_then(|entry| entry.get("mappings"))
        .unwrap_or(&response);

    Ok(ToolResult::text(format!("Mappings for index: {}", args.index))
        .with_text(pretty(mappings)?))
}

/// Handle index creation through MCP
pub async fn handle_create_index(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: CreateIndexArgs = args.parse()?;

    let mut body = Map::new();
    if let Some(settings) = args.settings {
        body.insert("settings".to_string(), settings);
    }
    if let Some(mappings) = args.mappings {
        body.insert("mappings".to_string(), mappings);
    }

    let response = store.create_index(&args.index, Value::Object(body)).await?;
    info!("Created index '{}'", args.index);

    let acknowledged = response
        .get("acknowledged")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Ok(ToolResult::text(format!(
        "Index '{}' created successfully (acknowledged: {})",
        args.index, acknowledged
    )))
}

/// Handle index deletion through MCP
pub async fn handle_delete_index(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: IndexArgs = args.parse()?;
    store.delete_index(&args.index).await?;
    info!("Deleted index '{}'", args.index);

    Ok(ToolResult::text(format!(
        "Index '{}' deleted successfully",
        args.index
    )))
}

/// Handle index template listing through MCP
pub async fn handle_get_templates(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: NameFilterArgs = args.parse()?;
    let response = store.get_index_templates(filter_arg(args.name.as_deref())).await?;

    let templates: Vec<Value> = response
        .get("index_templates")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| {
                    let template = entry.get("index_template");
                    json!({
                        "name": entry.get("name").cloned().unwrap_or(Value::Null),
                        "indexPatterns": template
                            .and_then(|t| t.get("index_patterns"))
                            .cloned()
                            .unwrap_or_else(|| json!([])),
                        "priority": template
                            .and_then(|t| t.get("priority"))
                            .cloned()
                            .unwrap_or(Value::Null),
                        "template": template
                            .and_then(|t| t.get("template"))
                            .cloned()
                            .unwrap_or_else(|| json!({})),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(ToolResult::text(format!("Found {} index templates", templates.len()))
        .with_text(pretty(&Value::Array(templates))?))
}

/// Handle alias listing through MCP
///
/// The store answers with `{index: {aliases: {alias: {...}}}}`; this is
/// flattened to one entry per alias/index pair.
pub async fn handle_get_aliases(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: NameFilterArgs = args.parse()?;
    let response = store.get_aliases(filter_arg(args.name.as_deref())).await?;

    let mut aliases = Vec::new();
    if let Some(indices) = response.as_object() {
        for (index, entry) in indices {
            let Some(index_aliases) = entry.get("aliases").and_then(Value::as_object) else {
                continue;
            };
            for (alias, properties) in index_aliases {
                aliases.push(json!({
                    "alias": alias,
                    "index": index,
                    "properties": properties,
                }));
            }
        }
    }

    Ok(ToolResult::text(format!("Found {} aliases", aliases.len()))
        .with_text(pretty(&Value::Array(aliases))?))
}
