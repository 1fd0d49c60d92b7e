//! Bulk operation compiler and result reconciliation.
//!
//! A bulk call is described as a list of logical [`BulkOperation`]s. Before
//! anything is sent, [`compile`] checks every operation and expands it into
//! the store's wire format: an action descriptor line, followed by a payload
//! line for everything except `delete`.
//!
//! The store answers with one result item per logical operation, in request
//! order. [`summarize`] pairs those items back with the operations by
//! position and produces a [`BulkSummary`].
//!
//! ```rust
//! use elastic_mcp_server::bulk::{BulkAction, BulkOperation, compile};
//! use serde_json::json;
//!
//! let ops = vec![
//!     BulkOperation::new(BulkAction::Index, "books").with_document(json!({"title": "Dune"})),
//!     BulkOperation::new(BulkAction::Delete, "books").with_id("42"),
//! ];
//! let compiled = compile(&ops).unwrap();
//! assert_eq!(compiled.entries.len(), 3);
//! assert_eq!(compiled.action_positions, vec![0, 2]);
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::report::push_failure_list;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// The four document-level bulk actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Index,
    Create,
    Update,
    Delete,
}

impl BulkAction {
    pub const ALL: [&'static str; 4] = ["index", "create", "update", "delete"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn requires_id(&self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }

    fn requires_document(&self) -> bool {
        !matches!(self, Self::Delete)
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical bulk operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkOperation {
    pub action: BulkAction,
    pub index: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,
}

impl BulkOperation {
    pub fn new(action: BulkAction, index: impl Into<String>) -> Self {
        Self {
            action,
            index: index.into(),
            id: None,
            document: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_document(mut self, document: Value) -> Self {
        self.document = Some(document);
        self
    }

    /// The document ID, if one was given; blank IDs count as absent.
    pub fn document_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Check the action/field invariant; `position` is 1-based.
    pub fn validate(&self, position: usize) -> ValidationResult<()> {
        if self.action.requires_id() && self.document_id().is_none() {
            return Err(ValidationError::bulk_operation(
                position,
                self.action.as_str(),
                format!("Document ID is required for {} operations", self.action),
            ));
        }
        if self.action.requires_document() && self.document.is_none() {
            return Err(ValidationError::bulk_operation(
                position,
                self.action.as_str(),
                format!("Document is required for {} operations", self.action),
            ));
        }
        Ok(())
    }

    fn descriptor(&self) -> Value {
        let mut meta = Map::new();
        meta.insert("_index".to_string(), json!(self.index));
        if let Some(id) = self.document_id() {
            meta.insert("_id".to_string(), json!(id));
        }
        let mut descriptor = Map::new();
        descriptor.insert(self.action.as_str().to_string(), Value::Object(meta));
        Value::Object(descriptor)
    }

    fn payload(&self) -> Option<Value> {
        let document = self.document.clone()?;
        match self.action {
            BulkAction::Index | BulkAction::Create => Some(document),
            BulkAction::Update => Some(json!({ "doc": document })),
            BulkAction::Delete => None,
        }
    }
}

/// Wire entries for a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledBulk {
    pub entries: Vec<Value>,
    /// Position in `entries` of each logical operation's action descriptor
    pub action_positions: Vec<usize>,
}

/// Validate every operation, then expand them in order into wire entries.
///
/// Validation is fail-fast: the first invalid operation aborts compilation
/// and nothing is produced.
pub fn compile(operations: &[BulkOperation]) -> ValidationResult<CompiledBulk> {
    for (i, op) in operations.iter().enumerate() {
        op.validate(i + 1)?;
    }

    let mut entries = Vec::with_capacity(operations.len() * 2);
    let mut action_positions = Vec::with_capacity(operations.len());
    for op in operations {
        action_positions.push(entries.len());
        entries.push(op.descriptor());
        if let Some(payload) = op.payload() {
            entries.push(payload);
        }
    }

    Ok(CompiledBulk {
        entries,
        action_positions,
    })
}

/// Outcome of one bulk item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkItemOutcome {
    Success { result: String },
    Failure { error_type: String, error_reason: String },
}

/// Per-operation record in a [`BulkSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemResult {
    /// 0-based position of the logical operation
    pub operation_index: usize,
    pub action: String,
    pub document_id: String,
    pub index_name: String,
    pub status: u16,
    pub outcome: BulkItemOutcome,
}

impl BulkItemResult {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, BulkItemOutcome::Failure { .. })
    }
}

/// Reconciled result of a bulk call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSummary {
    pub took: u64,
    /// Set when the store flagged errors or any operation failed
    pub errors: bool,
    pub total_operations: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub items: Vec<BulkItemResult>,
}

/// Pair the store's per-item results with the logical operations.
///
/// Exactly one record is produced per operation. An item the store did not
/// return is recorded as a failure with fallback fields.
pub fn summarize(operations: &[BulkOperation], response: &Value) -> BulkSummary {
    let empty = Vec::new();
    let items = response
        .get("items")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    let records: Vec<BulkItemResult> = operations
        .iter()
        .enumerate()
        .map(|(i, op)| summarize_item(i, op, items.get(i)))
        .collect();

    let failure_count = records.iter().filter(|r| r.is_failure()).count();
    BulkSummary {
        took: response.get("took").and_then(Value::as_u64).unwrap_or(0),
        errors: failure_count > 0
            || response
                .get("errors")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        total_operations: operations.len(),
        success_count: records.len() - failure_count,
        failure_count,
        items: records,
    }
}

fn summarize_item(index: usize, op: &BulkOperation, item: Option<&Value>) -> BulkItemResult {
    // Each item is an object with a single key naming the action.
    let (action, result) = match item.and_then(Value::as_object).and_then(|o| o.iter().next()) {
        Some((action, result)) => (action.clone(), Some(result)),
        None => (op.action.as_str().to_string(), None),
    };

    let field = |name: &str| {
        result
            .and_then(|r| r.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let document_id = field("_id").unwrap_or_else(|| "unknown".to_string());
    let index_name = field("_index").unwrap_or_else(|| "unknown".to_string());
    let status = result
        .and_then(|r| r.get("status"))
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(0);

    // A missing item is a failure with no error details.
    let error: Option<Option<&Value>> = match result {
        Some(r) => r.get("error").filter(|e| !e.is_null()).map(Some),
        None => Some(None),
    };

    let outcome = match error {
        Some(error) => BulkItemOutcome::Failure {
            error_type: error
                .and_then(|e| e.get("type"))
                .and_then(Value::as_str)
                .unwrap_or("unknown_error")
                .to_string(),
            error_reason: error
                .and_then(|e| e.get("reason"))
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string(),
        },
        None => BulkItemOutcome::Success {
            result: field("result").unwrap_or_else(|| "unknown".to_string()),
        },
    };

    BulkItemResult {
        operation_index: index,
        action,
        document_id,
        index_name,
        status,
        outcome,
    }
}

impl BulkSummary {
    pub fn failures(&self) -> impl Iterator<Item = &BulkItemResult> {
        self.items.iter().filter(|r| r.is_failure())
    }

    /// Human-readable report with a truncated failure list.
    pub fn render(&self) -> String {
        let mut out = format!(
            "Bulk operation completed in {}ms\nErrors: {}\nTotal operations: {}\nSuccessful: {}\nFailed: {}",
            self.took, self.errors, self.total_operations, self.success_count, self.failure_count
        );

        let entries = self.failures().map(|r| {
            let (error_type, error_reason) = match &r.outcome {
                BulkItemOutcome::Failure {
                    error_type,
                    error_reason,
                } => (error_type.as_str(), error_reason.as_str()),
                BulkItemOutcome::Success { .. } => ("", ""),
            };
            format!(
                "Operation #{} ({}) on index '{}', ID '{}': status {}, {}: {}",
                r.operation_index + 1,
                r.action,
                r.index_name,
                r.document_id,
                r.status,
                error_type,
                error_reason
            )
        });
        push_failure_list(&mut out, "Failed operations:", entries, self.failure_count);
        out
    }
}
