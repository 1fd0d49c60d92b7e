//! MCP (Model Context Protocol) integration for Elasticsearch
//!
//! This module exposes Elasticsearch operations as schema-validated tools for
//! AI agents. Every tool call yields a uniform [`ToolResult`] envelope.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   AI Agent      │───▶│  MCP Protocol    │───▶│  Elasticsearch  │
//! │   (Client)      │    │  (This Module)   │    │  (StoreClient)  │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//!          │                        │                       │
//!          ▼                        ▼                       ▼
//!    Tool Discovery          Schema Validation       Native Operations
//!    rust-mcp-sdk stdio      Result Envelopes        Retries, Auth
//! ```
//!
//! ## Module Structure
//!
//! - `core` - result envelope and [`ElasticMcpServer`]
//! - `registry` - immutable tool catalogue and the dispatch catch boundary
//! - `protocol` - `rust-mcp-sdk` server handler and stdio runtime (`mcp` feature)
//! - `tools/` - tool definitions (name, description, argument schema, handler)
//! - `handlers/` - tool execution against a [`StoreClient`](crate::store::StoreClient)
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use elastic_mcp_server::{ElasticMcpServer, HttpStoreClient, StoreConfig};
//! use serde_json::json;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = StoreConfig::local(Url::parse("http://localhost:9200")?);
//!     let server = ElasticMcpServer::new(HttpStoreClient::new(&config)?)?;
//!
//!     let result = server
//!         .execute_tool(
//!             "bulk",
//!             json!({
//!                 "operations": [
//!                     {"action": "index", "index": "books", "document": {"title": "Dune"}},
//!                     {"action": "delete", "index": "books", "id": "42"}
//!                 ]
//!             }),
//!         )
//!         .await?;
//!
//!     println!("{}", result.joined_text());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod handlers;
#[cfg(feature = "mcp")]
pub mod protocol;
pub mod registry;
pub mod tools;

pub use core::{ContentFragment, ElasticMcpServer, McpServerInfo, ToolResult};
pub use registry::{
    HandlerFuture, ToolDefinition, ToolHandler, ToolRegistry, ToolRegistryBuilder,
};

#[cfg(feature = "mcp")]
pub use protocol::ElasticMcpHandler;
