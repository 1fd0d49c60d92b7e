//! Cluster information handlers for MCP integration

use super::{filter_arg, pretty};
use crate::{
    error::ToolError, mcp_integration::core::ToolResult, schema::Arguments, store::StoreClient,
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct ShardArgs {
    index: Option<String>,
}

/// Render a `_cluster/health` response.
pub fn render_health(health: &Value) -> String {
    let text = |name: &str| health.get(name).and_then(Value::as_str).unwrap_or("unknown");
    let number = |name: &str| health.get(name).and_then(Value::as_u64).unwrap_or(0);

    format!(
        "Elasticsearch Cluster Health:\n\
         Cluster Name: {}\n\
         Status: {}\n\
         Number of Nodes: {}\n\
         Number of Data Nodes: {}\n\
         Active Primary Shards: {}\n\
         Active Shards: {}\n\
         Relocating Shards: {}\n\
         Initializing Shards: {}\n\
         Unassigned Shards: {}\n\
         Pending Tasks: {}",
        text("cluster_name"),
        text("status"),
        number("number_of_nodes"),
        number("number_of_data_nodes"),
        number("active_primary_shards"),
        number("active_shards"),
        number("relocating_shards"),
        number("initializing_shards"),
        number("unassigned_shards"),
        number("number_of_pending_tasks"),
    )
}

/// Handle cluster health retrieval through MCP
pub async fn handle_cluster_health(
    store: &dyn StoreClient,
    _args: Arguments,
) -> Result<ToolResult, ToolError> {
    let health = store.cluster_health().await?;
    Ok(ToolResult::text(render_health(&health)))
}

/// Handle shard listing through MCP
pub async fn handle_get_shards(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: ShardArgs = args.parse()?;
    let index = filter_arg(args.index.as_deref());
    let response = store.cat_shards(index).await?;

    let shards: Vec<Value> = response
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    let column = |name: &str| row.get(name).cloned().unwrap_or(Value::Null);
                    json!({
                        "index": column("index"),
                        "shard": column("shard"),
                        "prirep": column("prirep"),
                        "state": column("state"),
                        "docs": column("docs"),
                        "store": column("store"),
                        "ip": column("ip"),
                        "node": column("node"),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let heading = match index {
        Some(index) => format!("Found {} shards for index {}", shards.len(), index),
        None => format!("Found {} shards", shards.len()),
    };

    Ok(ToolResult::text(heading).with_text(pretty(&Value::Array(shards))?))
}
