//! Store client abstraction.
//!
//! [`StoreClient`] is the seam between tool handlers and the remote
//! Elasticsearch cluster. It exposes one async method per native operation and
//! returns the store's raw JSON response; shaping that response for callers
//! is the handlers' job.
//!
//! The production implementation is [`HttpStoreClient`]. Tests supply their
//! own recording implementation.
//!
//! # Concurrency
//!
//! A single client is shared by every in-flight tool invocation. Implementations
//! must be `Send + Sync` and must not serialize calls against each other;
//! connection pooling, timeouts and retries are the client's responsibility.

pub mod http;

pub use http::HttpStoreClient;

use crate::error::StoreResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Native operations of the remote store.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// List indices matching a pattern (`_cat/indices`, JSON format).
    async fn list_indices(&self, pattern: &str) -> StoreResult<Value>;

    /// Fetch the mapping of an index.
    async fn get_mapping(&self, index: &str) -> StoreResult<Value>;

    /// Run a search with a full request body.
    async fn search(&self, index: &str, body: Value) -> StoreResult<Value>;

    /// Index a document, letting the store assign an id when `id` is `None`.
    async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        document: Value,
    ) -> StoreResult<Value>;

    /// Apply a partial document update.
    async fn update_document(&self, index: &str, id: &str, partial: Value) -> StoreResult<Value>;

    async fn delete_document(&self, index: &str, id: &str) -> StoreResult<Value>;

    async fn update_by_query(&self, params: UpdateByQueryParams) -> StoreResult<Value>;

    async fn delete_by_query(&self, params: DeleteByQueryParams) -> StoreResult<Value>;

    /// Execute a compiled bulk request.
    async fn bulk(&self, request: BulkRequest) -> StoreResult<Value>;

    /// Create an index; `body` may carry `settings` and `mappings`.
    async fn create_index(&self, index: &str, body: Value) -> StoreResult<Value>;

    async fn delete_index(&self, index: &str) -> StoreResult<Value>;

    /// Count documents, optionally restricted by a query.
    async fn count(&self, index: &str, query: Option<Value>) -> StoreResult<Value>;

    /// Composable index templates, all or by name.
    async fn get_index_templates(&self, name: Option<&str>) -> StoreResult<Value>;

    /// Aliases, all or by name.
    async fn get_aliases(&self, name: Option<&str>) -> StoreResult<Value>;

    async fn cluster_health(&self) -> StoreResult<Value>;

    /// Shard allocation (`_cat/shards`, JSON format), all or for one index.
    async fn cat_shards(&self, index: Option<&str>) -> StoreResult<Value>;
}

/// Conflict handling for query-scoped mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conflicts {
    Abort,
    Proceed,
}

impl Conflicts {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Proceed => "proceed",
        }
    }
}

/// Painless script for update-by-query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

/// Wire parameters for `_update_by_query`.
///
/// `conflicts` and `max_docs` are omitted from the request entirely when
/// `None`, leaving the store's own defaults in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateByQueryParams {
    pub index: String,
    pub query: Value,
    pub script: Script,
    pub conflicts: Option<Conflicts>,
    pub max_docs: Option<u64>,
    pub refresh: bool,
}

impl UpdateByQueryParams {
    pub fn query_string(&self) -> Vec<(&'static str, String)> {
        mutation_query_string(self.conflicts, self.max_docs, self.refresh)
    }

    pub fn body(&self) -> Value {
        json!({
            "query": self.query,
            "script": self.script,
        })
    }
}

/// Wire parameters for `_delete_by_query`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteByQueryParams {
    pub index: String,
    pub query: Value,
    pub conflicts: Option<Conflicts>,
    pub max_docs: Option<u64>,
    pub refresh: bool,
}

impl DeleteByQueryParams {
    pub fn query_string(&self) -> Vec<(&'static str, String)> {
        mutation_query_string(self.conflicts, self.max_docs, self.refresh)
    }

    pub fn body(&self) -> Value {
        json!({ "query": self.query })
    }
}

fn mutation_query_string(
    conflicts: Option<Conflicts>,
    max_docs: Option<u64>,
    refresh: bool,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("refresh", refresh.to_string())];
    if let Some(conflicts) = conflicts {
        params.push(("conflicts", conflicts.as_str().to_string()));
    }
    if let Some(max_docs) = max_docs {
        params.push(("max_docs", max_docs.to_string()));
    }
    params
}

/// A compiled `_bulk` request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkRequest {
    /// Action/payload entries in wire order
    pub operations: Vec<Value>,
    pub refresh: bool,
    pub pipeline: Option<String>,
}

impl BulkRequest {
    pub fn query_string(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("refresh", self.refresh.to_string())];
        if let Some(pipeline) = &self.pipeline {
            params.push(("pipeline", pipeline.clone()));
        }
        params
    }

    /// Newline-delimited body, one entry per line with a trailing newline.
    pub fn to_ndjson(&self) -> String {
        let mut body = String::new();
        for entry in &self.operations {
            body.push_str(&entry.to_string());
            body.push('\n');
        }
        body
    }
}
