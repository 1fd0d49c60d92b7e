//! Bulk and query-scoped mutation tool definitions.

use super::index_schemas::index_arg;
use crate::bulk::BulkAction;
use crate::mcp_integration::handlers::mutations;
use crate::mcp_integration::registry::{ToolDefinition, tool_handler};
use crate::schema::{ArgSpec, ArgType, ArgumentSchema};

const CONFLICT_MODES: &[&str] = &["abort", "proceed"];

fn conflicts_arg() -> ArgSpec {
    ArgSpec::optional(
        "conflicts",
        ArgType::Enum(CONFLICT_MODES),
        "What to do on version conflicts: abort (default) or proceed",
    )
}

fn max_docs_arg() -> ArgSpec {
    ArgSpec::optional(
        "maxDocs",
        ArgType::Integer { min: Some(1) },
        "Maximum number of documents to process",
    )
}

fn refresh_arg() -> ArgSpec {
    ArgSpec::optional(
        "refresh",
        ArgType::Boolean,
        "Refresh affected shards afterwards (default: true)",
    )
}

pub fn update_by_query_tool() -> ToolDefinition {
    ToolDefinition::new(
        "update_by_query",
        "Update every document matching a query using a script",
        ArgumentSchema::new(vec![
            index_arg("Name of the index to update"),
            ArgSpec::required("query", ArgType::Object, "Query selecting the documents to update"),
            ArgSpec::required(
                "script",
                ArgType::Record(vec![
                    ArgSpec::required(
                        "source",
                        ArgType::non_empty_string(),
                        "Painless script source",
                    ),
                    ArgSpec::optional("params", ArgType::Object, "Script parameters"),
                ]),
                "Script applied to each matching document",
            ),
            conflicts_arg(),
            max_docs_arg(),
            refresh_arg(),
        ]),
        tool_handler!(mutations::handle_update_by_query),
    )
}

pub fn delete_by_query_tool() -> ToolDefinition {
    ToolDefinition::new(
        "delete_by_query",
        "Delete every document matching a query",
        ArgumentSchema::new(vec![
            index_arg("Name of the index to delete from"),
            ArgSpec::required("query", ArgType::Object, "Query selecting the documents to delete"),
            conflicts_arg(),
            max_docs_arg(),
            refresh_arg(),
        ]),
        tool_handler!(mutations::handle_delete_by_query),
    )
}

pub fn bulk_tool() -> ToolDefinition {
    let operation = ArgType::Record(vec![
        ArgSpec::required(
            "action",
            ArgType::Enum(&BulkAction::ALL),
            "Operation type: index, create, update or delete",
        ),
        ArgSpec::required("index", ArgType::non_empty_string(), "Target index"),
        ArgSpec::optional(
            "id",
            ArgType::string(),
            "Document ID (required for update and delete)",
        ),
        ArgSpec::optional(
            "document",
            ArgType::Object,
            "Document body (required for index, create and update)",
        ),
    ]);

    ToolDefinition::new(
        "bulk",
        "Execute several index, create, update and delete operations in a single request",
        ArgumentSchema::new(vec![
            ArgSpec::required(
                "operations",
                ArgType::Array {
                    items: Box::new(operation),
                    min_items: 1,
                },
                "Operations to execute, in order",
            ),
            ArgSpec::optional(
                "pipeline",
                ArgType::non_empty_string(),
                "Ingest pipeline applied to indexed documents",
            ),
            refresh_arg(),
        ]),
        tool_handler!(mutations::handle_bulk),
    )
}
