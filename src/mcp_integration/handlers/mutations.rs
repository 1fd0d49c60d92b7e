//! Bulk and query-scoped mutation handlers for MCP integration
//!
//! Partial failures are not errors here: a bulk call in which some items
//! failed, or a query mutation that reports failures, still produces a
//! success envelope whose text lists what went wrong.

use crate::{
    bulk::{self, BulkOperation},
    error::ToolError,
    mcp_integration::core::ToolResult,
    query_mutation::{
        MutationKind, QueryMutationResult, build_delete_by_query_params,
        build_update_by_query_params,
    },
    schema::Arguments,
    store::{BulkRequest, Conflicts, Script, StoreClient},
};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateByQueryArgs {
    index: String,
    query: Value,
    script: Script,
    conflicts: Option<Conflicts>,
    max_docs: Option<u64>,
    refresh: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteByQueryArgs {
    index: String,
    query: Value,
    conflicts: Option<Conflicts>,
    max_docs: Option<u64>,
    refresh: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct BulkArgs {
    operations: Vec<BulkOperation>,
    pipeline: Option<String>,
    refresh: Option<bool>,
}

/// Handle update-by-query through MCP
pub async fn handle_update_by_query(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: UpdateByQueryArgs = args.parse()?;
    let params = build_update_by_query_params(
        args.index.as_str(),
        args.query,
        args.script,
        args.conflicts,
        args.max_docs,
        args.refresh,
    );

    let response = store.update_by_query(params).await?;
    let report = QueryMutationResult::from_response(MutationKind::UpdateByQuery, &response);
    if report.failure_count > 0 {
        warn!(
            "Update by query on '{}' reported {} failures",
            args.index, report.failure_count
        );
    }

    Ok(ToolResult::text(report.render(&args.index)))
}

/// Handle delete-by-query through MCP
pub async fn handle_delete_by_query(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: DeleteByQueryArgs = args.parse()?;
    let params = build_delete_by_query_params(
        args.index.as_str(),
        args.query,
        args.conflicts,
        args.max_docs,
        args.refresh,
    );

    let response = store.delete_by_query(params).await?;
    let report = QueryMutationResult::from_response(MutationKind::DeleteByQuery, &response);
    if report.failure_count > 0 {
        warn!(
            "Delete by query on '{}' reported {} failures",
            args.index, report.failure_count
        );
    }

    Ok(ToolResult::text(report.render(&args.index)))
}

/// Handle bulk operations through MCP
///
/// Every operation is checked before the store is contacted; the first
/// invalid one rejects the whole call.
pub async fn handle_bulk(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: BulkArgs = args.parse()?;
    let compiled = bulk::compile(&args.operations)?;

    let request = BulkRequest {
        operations: compiled.entries,
        refresh: args.refresh.unwrap_or(true),
        pipeline: args.pipeline,
    };
    let response = store.bulk(request).await?;

    let summary = bulk::summarize(&args.operations, &response);
    info!(
        "Bulk request finished: {} succeeded, {} failed",
        summary.success_count, summary.failure_count
    );

    Ok(ToolResult::text(summary.render()))
}
