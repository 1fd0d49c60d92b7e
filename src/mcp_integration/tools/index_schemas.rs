//! Index-level tool definitions.

use crate::mcp_integration::handlers::indices;
use crate::mcp_integration::registry::{ToolDefinition, tool_handler};
use crate::schema::{ArgSpec, ArgType, ArgumentSchema};

pub fn list_indices_tool() -> ToolDefinition {
    ToolDefinition::new(
        "list_indices",
        "List all available Elasticsearch indices",
        ArgumentSchema::new(vec![ArgSpec::required(
            "indexPattern",
            ArgType::non_empty_string(),
            "Index pattern of Elasticsearch indices to list",
        )]),
        tool_handler!(indices::handle_list_indices),
    )
}

pub fn get_mappings_tool() -> ToolDefinition {
    ToolDefinition::new(
        "get_mappings",
        "Get field mappings for a specific Elasticsearch index",
        ArgumentSchema::new(vec![index_arg(
            "Name of the Elasticsearch index to get mappings for",
        )]),
        tool_handler!(indices::handle_get_mappings),
    )
}

pub fn create_index_tool() -> ToolDefinition {
    ToolDefinition::new(
        "create_index",
        "Create a new Elasticsearch index with optional settings and mappings",
        ArgumentSchema::new(vec![
            index_arg("Name of the index to create"),
            ArgSpec::optional(
                "settings",
                ArgType::Object,
                "Index settings such as number_of_shards and number_of_replicas",
            ),
            ArgSpec::optional("mappings", ArgType::Object, "Field mappings for the index"),
        ]),
        tool_handler!(indices::handle_create_index),
    )
}

pub fn delete_index_tool() -> ToolDefinition {
    ToolDefinition::new(
        "delete_index",
        "Delete an Elasticsearch index and all of its documents",
        ArgumentSchema::new(vec![index_arg("Name of the index to delete")]),
        tool_handler!(indices::handle_delete_index),
    )
}

pub fn get_templates_tool() -> ToolDefinition {
    ToolDefinition::new(
        "get_templates",
        "Get index templates, optionally filtered by name",
        ArgumentSchema::new(vec![ArgSpec::optional(
            "name",
            ArgType::string(),
            "Template name or wildcard pattern",
        )]),
        tool_handler!(indices::handle_get_templates),
    )
}

pub fn get_aliases_tool() -> ToolDefinition {
    ToolDefinition::new(
        "get_aliases",
        "Get index aliases, optionally filtered by alias name",
        ArgumentSchema::new(vec![ArgSpec::optional(
            "name",
            ArgType::string(),
            "Alias name or wildcard pattern",
        )]),
        tool_handler!(indices::handle_get_aliases),
    )
}

pub(crate) fn index_arg(description: &'static str) -> ArgSpec {
    ArgSpec::required("index", ArgType::non_empty_string(), description)
}
