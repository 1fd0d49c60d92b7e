//! Core MCP integration infrastructure
//!
//! This module contains the result envelope shared by every tool and the
//! server type that binds the tool catalogue to a store client.

use super::registry::ToolRegistry;
use crate::error::RegistryError;
use crate::store::StoreClient;
use serde::Serialize;
use serde_json::Value;

/// Information about the MCP server for AI agent discovery
#[derive(Debug, Clone)]
pub struct McpServerInfo {
    /// Name reported in the `initialize` handshake
    pub name: String,
    /// Version reported in the `initialize` handshake
    pub version: String,
}

impl Default for McpServerInfo {
    fn default() -> Self {
        Self {
            name: "elasticsearch-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One fragment of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentFragment {
    Text { text: String },
}

impl ContentFragment {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Tool execution result returned to MCP clients.
///
/// Every tool invocation produces exactly one of these. Hard failures are
/// built with [`ToolResult::error`]: a single `Error: <message>` fragment
/// with `is_error` set. Partial failures inside bulk and query-scoped
/// mutations are ordinary successes whose text reports the failed items.
///
/// # Examples
///
/// ```rust
/// use elastic_mcp_server::mcp_integration::ToolResult;
///
/// let ok = ToolResult::text("Found 3 indices").with_text("[]");
/// assert_eq!(ok.content.len(), 2);
/// assert!(!ok.is_error);
///
/// let failed = ToolResult::error("index_not_found_exception: no such index [x]");
/// assert_eq!(failed.first_text(), Some("Error: index_not_found_exception: no such index [x]"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ContentFragment>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    /// Successful result with one text fragment
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentFragment::text(text)],
            is_error: false,
        }
    }

    /// Successful result built from several fragments
    pub fn fragments<I, T>(fragments: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            content: fragments.into_iter().map(ContentFragment::text).collect(),
            is_error: false,
        }
    }

    /// Error result whose only fragment is `Error: <message>`
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            content: vec![ContentFragment::text(format!("Error: {message}"))],
            is_error: true,
        }
    }

    /// Append a text fragment
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(ContentFragment::text(text));
        self
    }

    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(ContentFragment::as_text)
    }

    /// All fragments joined with newlines
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(ContentFragment::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// MCP server exposing Elasticsearch operations as tools
///
/// Wraps a [`StoreClient`] and the immutable [`ToolRegistry`] built at
/// construction. The registry never changes afterwards, so a server can be
/// shared freely between concurrent invocations.
///
/// # Examples
///
/// ```rust,no_run
/// use elastic_mcp_server::{ElasticMcpServer, HttpStoreClient, RawConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let config = RawConfig::from_env().validate()?;
/// let store = HttpStoreClient::new(&config)?;
/// let server = ElasticMcpServer::new(store)?;
///
/// let result = server
///     .execute_tool("list_indices", serde_json::json!({"indexPattern": "*"}))
///     .await?;
/// println!("{}", result.joined_text());
/// # Ok(())
/// # }
/// ```
pub struct ElasticMcpServer<S: StoreClient> {
    pub(crate) registry: ToolRegistry,
    pub(crate) store: S,
    pub(crate) server_info: McpServerInfo,
}

impl<S: StoreClient + 'static> ElasticMcpServer<S> {
    /// Create a server with the standard tool catalogue
    pub fn new(store: S) -> Result<Self, RegistryError> {
        Ok(Self::with_registry(
            store,
            ToolRegistry::with_default_tools()?,
            McpServerInfo::default(),
        ))
    }

    /// Create a server with a custom catalogue and server information
    pub fn with_registry(store: S, registry: ToolRegistry, server_info: McpServerInfo) -> Self {
        Self {
            registry,
            store,
            server_info,
        }
    }

    pub fn server_info(&self) -> &McpServerInfo {
        &self.server_info
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tool descriptors for `tools/list`
    pub fn get_tools(&self) -> Vec<Value> {
        self.registry
            .definitions()
            .iter()
            .map(|tool| tool.descriptor())
            .collect()
    }

    /// Execute a tool by name with raw JSON arguments.
    ///
    /// Only an unknown tool name is an `Err`; every other failure is
    /// reported inside the returned [`ToolResult`].
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        arguments: Value,
    ) -> Result<ToolResult, RegistryError> {
        self.registry.invoke(&self.store, tool_name, arguments).await
    }
}
