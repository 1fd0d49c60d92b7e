//! MCP tool definitions
//!
//! Each tool pairs a name and description with its argument schema and the
//! handler that executes it. Definitions are grouped by functional area:
//!
//! - [`index_schemas`] - index listing, mappings, templates, aliases and lifecycle
//! - [`document_schemas`] - search, counting and single-document CRUD
//! - [`mutation_schemas`] - bulk and query-scoped mutations
//! - [`cluster_schemas`] - cluster health and shard allocation

pub mod cluster_schemas;
pub mod document_schemas;
pub mod index_schemas;
pub mod mutation_schemas;

use super::registry::ToolDefinition;

/// The complete tool catalogue in discovery order.
pub fn catalogue() -> Vec<ToolDefinition> {
    vec![
        index_schemas::list_indices_tool(),
        index_schemas::get_mappings_tool(),
        document_schemas::search_tool(),
        cluster_schemas::get_cluster_health_tool(),
        cluster_schemas::get_shards_tool(),
        document_schemas::add_document_tool(),
        document_schemas::update_document_tool(),
        document_schemas::delete_document_tool(),
        mutation_schemas::update_by_query_tool(),
        mutation_schemas::delete_by_query_tool(),
        mutation_schemas::bulk_tool(),
        index_schemas::create_index_tool(),
        index_schemas::delete_index_tool(),
        document_schemas::count_documents_tool(),
        index_schemas::get_templates_tool(),
        index_schemas::get_aliases_tool(),
    ]
}
