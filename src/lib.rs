//! Elasticsearch tools for AI agents over the Model Context Protocol.
//!
//! Exposes a fixed catalogue of schema-validated tools (search, document
//! CRUD, bulk and query-scoped mutations, index and cluster inspection)
//! backed by a pluggable [`StoreClient`]. Every invocation produces a
//! uniform [`ToolResult`] envelope; partial failures inside bulk and
//! query-scoped mutations are reported in the envelope's text rather than
//! as errors.
//!
//! # Core Components
//!
//! - [`RawConfig`] / [`StoreConfig`] - connection settings and their validation
//! - [`StoreClient`] - native store operations; [`HttpStoreClient`] talks HTTP
//! - [`ElasticMcpServer`] - tool catalogue and dispatch; served over stdio by
//!   `rust-mcp-sdk` with the `mcp` feature (enabled by default)
//! - [`bulk`] and [`query_mutation`] - request compilation and result reporting
//!
//! # Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "mcp")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! use elastic_mcp_server::{ElasticMcpServer, HttpStoreClient, RawConfig};
//!
//! let config = RawConfig::from_env().validate()?;
//! let server = ElasticMcpServer::new(HttpStoreClient::new(&config)?)?;
//! server.run_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod bulk;
pub mod config;
pub mod error;
pub mod mcp_integration;
pub mod query_mutation;
pub mod report;
pub mod schema;
pub mod store;

// Re-export commonly used types for convenience
pub use config::{AuthMode, RawConfig, StoreConfig, StoreVersion};
pub use error::{ConfigError, RegistryError, ServeError, StoreError, ToolError, ValidationError};
pub use mcp_integration::{ElasticMcpServer, McpServerInfo, ToolRegistry, ToolResult};
pub use store::{HttpStoreClient, StoreClient};
