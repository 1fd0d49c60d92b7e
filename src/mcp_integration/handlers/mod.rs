//! Tool handlers
//!
//! Each handler receives arguments that already passed the tool's schema,
//! decodes them into a typed struct, calls the store and turns the store's
//! response into a [`ToolResult`](super::core::ToolResult). Failures are
//! returned as [`ToolError`](crate::error::ToolError) and folded into an
//! error envelope by the registry.
//!
//! - [`indices`] - index listing, mappings, lifecycle, templates and aliases
//! - [`documents`] - single-document CRUD and counting
//! - [`search`] - query execution with highlighting
//! - [`mutations`] - bulk, update-by-query and delete-by-query
//! - [`cluster`] - cluster health and shards

pub mod cluster;
pub mod documents;
pub mod indices;
pub mod mutations;
pub mod search;

use crate::error::ToolError;
use serde_json::Value;

/// Pretty-print a store payload for inclusion in tool output.
pub(crate) fn pretty(value: &Value) -> Result<String, ToolError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Optional filter argument; a blank value means no filter.
pub(crate) fn filter_arg(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
