//! Search and single-document tool definitions.

use super::index_schemas::index_arg;
use crate::mcp_integration::handlers::{documents, search};
use crate::mcp_integration::registry::{ToolDefinition, tool_handler};
use crate::schema::{ArgSpec, ArgType, ArgumentSchema};

pub fn search_tool() -> ToolDefinition {
    ToolDefinition::new(
        "search",
        "Perform an Elasticsearch search with the provided query DSL. Highlights are always enabled.",
        ArgumentSchema::new(vec![
            index_arg("Name of the Elasticsearch index to search"),
            ArgSpec::required(
                "queryBody",
                ArgType::Object,
                "Complete Elasticsearch query DSL object that can include query, size, from, sort, etc.",
            ),
        ]),
        tool_handler!(search::handle_search),
    )
}

pub fn add_document_tool() -> ToolDefinition {
    ToolDefinition::new(
        "add_document",
        "Add a document to an Elasticsearch index",
        ArgumentSchema::new(vec![
            index_arg("Name of the index to add the document to"),
            ArgSpec::required("document", ArgType::Object, "Document body to index"),
            ArgSpec::optional(
                "id",
                ArgType::non_empty_string(),
                "Document ID; generated by Elasticsearch when omitted",
            ),
        ]),
        tool_handler!(documents::handle_add_document),
    )
}

pub fn update_document_tool() -> ToolDefinition {
    ToolDefinition::new(
        "update_document",
        "Update fields of an existing document with a partial document",
        ArgumentSchema::new(vec![
            index_arg("Name of the index containing the document"),
            ArgSpec::required("id", ArgType::non_empty_string(), "ID of the document to update"),
            ArgSpec::required(
                "document",
                ArgType::Object,
                "Partial document with the fields to update",
            ),
        ]),
        tool_handler!(documents::handle_update_document),
    )
}

pub fn delete_document_tool() -> ToolDefinition {
    ToolDefinition::new(
        "delete_document",
        "Delete a document from an Elasticsearch index by ID",
        ArgumentSchema::new(vec![
            index_arg("Name of the index containing the document"),
            ArgSpec::required("id", ArgType::non_empty_string(), "ID of the document to delete"),
        ]),
        tool_handler!(documents::handle_delete_document),
    )
}

pub fn count_documents_tool() -> ToolDefinition {
    ToolDefinition::new(
        "count_documents",
        "Count documents in an index, optionally matching a query",
        ArgumentSchema::new(vec![
            index_arg("Name of the index to count documents in"),
            ArgSpec::optional("query", ArgType::Object, "Query DSL restricting the count"),
        ]),
        tool_handler!(documents::handle_count_documents),
    )
}
