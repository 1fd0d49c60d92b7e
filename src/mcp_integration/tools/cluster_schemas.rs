//! Cluster tool definitions.

use crate::mcp_integration::handlers::cluster;
use crate::mcp_integration::registry::{ToolDefinition, tool_handler};
use crate::schema::{ArgSpec, ArgType, ArgumentSchema};

pub fn get_cluster_health_tool() -> ToolDefinition {
    ToolDefinition::new(
        "get_cluster_health",
        "Get the health of the Elasticsearch cluster",
        ArgumentSchema::empty(),
        tool_handler!(cluster::handle_cluster_health),
    )
}

pub fn get_shards_tool() -> ToolDefinition {
    ToolDefinition::new(
        "get_shards",
        "Get shard information for all or specific indices",
        ArgumentSchema::new(vec![ArgSpec::optional(
            "index",
            ArgType::string(),
            "Optional index name to get shard information for",
        )]),
        tool_handler!(cluster::handle_get_shards),
    )
}
