//! Update-by-query and delete-by-query parameters and reporting.
//!
//! Both mutations share one reporting shape: how many documents matched,
//! how many were changed, how many failed, and a truncated list of the
//! failures the store reported.

use crate::report::{MAX_REPORTED_FAILURES, push_failure_list};
use crate::store::{Conflicts, DeleteByQueryParams, Script, UpdateByQueryParams};
use serde_json::Value;

/// Build `_update_by_query` parameters.
///
/// `refresh` is tri-state: `None` and `Some(true)` both refresh, only an
/// explicit `Some(false)` disables it.
pub fn build_update_by_query_params(
    index: impl Into<String>,
    query: Value,
    script: Script,
    conflicts: Option<Conflicts>,
    max_docs: Option<u64>,
    refresh: Option<bool>,
) -> UpdateByQueryParams {
    UpdateByQueryParams {
        index: index.into(),
        query,
        script,
        conflicts,
        max_docs,
        refresh: refresh.unwrap_or(true),
    }
}

/// Build `_delete_by_query` parameters, with the same defaults as
/// [`build_update_by_query_params`].
pub fn build_delete_by_query_params(
    index: impl Into<String>,
    query: Value,
    conflicts: Option<Conflicts>,
    max_docs: Option<u64>,
    refresh: Option<bool>,
) -> DeleteByQueryParams {
    DeleteByQueryParams {
        index: index.into(),
        query,
        conflicts,
        max_docs,
        refresh: refresh.unwrap_or(true),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    UpdateByQuery,
    DeleteByQuery,
}

impl MutationKind {
    fn title(&self) -> &'static str {
        match self {
            Self::UpdateByQuery => "Update by query",
            Self::DeleteByQuery => "Delete by query",
        }
    }

    /// Response field holding the affected-document count
    fn affected_field(&self) -> &'static str {
        match self {
            Self::UpdateByQuery => "updated",
            Self::DeleteByQuery => "deleted",
        }
    }
}

/// One per-document failure reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub document_id: String,
    pub reason: String,
}

/// Normalized result of a query-scoped mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMutationResult {
    pub kind: MutationKind,
    pub took: u64,
    pub total_matched: u64,
    pub affected: u64,
    pub failure_count: usize,
    /// Only tracked for delete-by-query
    pub version_conflicts: Option<u64>,
    /// The first failures, at most [`MAX_REPORTED_FAILURES`]
    pub failures: Vec<QueryFailure>,
    /// Failures beyond the ones kept in `failures`
    pub overflow: usize,
}

impl QueryMutationResult {
    /// Interpret the store's response. Missing counters read as zero.
    pub fn from_response(kind: MutationKind, response: &Value) -> Self {
        let counter = |name: &str| response.get(name).and_then(Value::as_u64).unwrap_or(0);
        let all_failures = response
            .get("failures")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let failures = all_failures
            .iter()
            .take(MAX_REPORTED_FAILURES)
            .map(|f| QueryFailure {
                document_id: f
                    .get("id")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                reason: f
                    .get("cause")
                    .and_then(|c| c.get("reason"))
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string(),
            })
            .collect();

        Self {
            kind,
            took: counter("took"),
            total_matched: counter("total"),
            affected: counter(kind.affected_field()),
            failure_count: all_failures.len(),
            version_conflicts: match kind {
                MutationKind::DeleteByQuery => Some(counter("version_conflicts")),
                MutationKind::UpdateByQuery => None,
            },
            failures,
            overflow: all_failures.len().saturating_sub(MAX_REPORTED_FAILURES),
        }
    }

    pub fn render(&self, index: &str) -> String {
        let mut out = format!(
            "{} completed on index '{}'\nTotal documents processed: {}\nDocuments {}: {}\nFailed: {}\nTime taken: {}ms",
            self.kind.title(),
            index,
            self.total_matched,
            self.kind.affected_field(),
            self.affected,
            self.failure_count,
            self.took
        );
        if let Some(conflicts) = self.version_conflicts.filter(|c| *c > 0) {
            out.push_str(&format!("\nVersion conflicts: {conflicts}"));
        }

        let entries = self
            .failures
            .iter()
            .map(|f| format!("ID: {}, Reason: {}", f.document_id, f.reason));
        push_failure_list(&mut out, "Failures:", entries, self.failure_count);
        out
    }
}
