//! MCP protocol adapter built on `rust-mcp-sdk`
//!
//! [`ElasticMcpHandler`] implements the SDK's [`ServerHandler`]: `tools/list`
//! publishes the registry descriptors and `tools/call` runs through
//! [`ElasticMcpServer::execute_tool`]. Message framing, the `initialize`
//! handshake and JSON-RPC error codes are handled by the SDK runtime.
//!
//! Each tool call executes in its own task. A handler that panics still
//! answers its caller with an error envelope.

use super::core::{ElasticMcpServer, ToolResult};
use crate::error::{RegistryError, ServeError};
use crate::store::StoreClient;
use async_trait::async_trait;
use log::{error, info, warn};
use rust_mcp_sdk::{
    McpServer, StdioTransport, ToMcpServerHandler, TransportOptions,
    mcp_server::{McpServerOptions, ServerHandler, ServerRuntime, server_runtime},
    schema::{
        CallToolRequestParams, CallToolResult, Implementation, InitializeResult, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, RpcError, ServerCapabilities,
        ServerCapabilitiesTools, TextContent, Tool, schema_utils::CallToolError,
    },
};
use serde_json::Value;
use std::sync::Arc;

const SERVER_TITLE: &str = "Elasticsearch MCP Server";
const SERVER_INSTRUCTIONS: &str = "Use list_indices and get_mappings to discover data before \
     searching. search takes a full Elasticsearch query body. bulk, update_by_query and \
     delete_by_query report per-item failures in their text without failing the call.";

/// SDK handler serving an [`ElasticMcpServer`]
pub struct ElasticMcpHandler<S: StoreClient> {
    server: Arc<ElasticMcpServer<S>>,
}

impl<S: StoreClient + 'static> ElasticMcpHandler<S> {
    pub fn new(server: ElasticMcpServer<S>) -> Self {
        Self {
            server: Arc::new(server),
        }
    }

    pub fn server(&self) -> &ElasticMcpServer<S> {
        &self.server
    }

    /// Server details announced during the `initialize` handshake
    pub fn initialize_result(&self) -> InitializeResult {
        let info = self.server.server_info();
        InitializeResult {
            server_info: Implementation {
                name: info.name.clone(),
                version: info.version.clone(),
                title: Some(SERVER_TITLE.into()),
                description: Some(env!("CARGO_PKG_DESCRIPTION").into()),
                icons: vec![],
                website_url: None,
            },
            capabilities: ServerCapabilities {
                tools: Some(ServerCapabilitiesTools { list_changed: None }),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::V2025_11_25.into(),
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            meta: None,
        }
    }

    /// Tool descriptors in catalogue order.
    ///
    /// # Errors
    ///
    /// Fails if a generated descriptor is not a valid MCP tool.
    pub fn list_tools(&self) -> Result<ListToolsResult, serde_json::Error> {
        let tools = self
            .server
            .get_tools()
            .into_iter()
            .map(serde_json::from_value::<Tool>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools,
        })
    }

    /// Execute one `tools/call` request.
    ///
    /// # Errors
    ///
    /// Only an unknown tool name is an `Err`; every other failure,
    /// including a panicking handler, comes back as an error envelope.
    pub async fn call_tool(
        &self,
        params: CallToolRequestParams,
    ) -> Result<CallToolResult, CallToolError> {
        let name = params.name;
        let arguments = params.arguments.map(Value::Object).unwrap_or(Value::Null);

        let server = Arc::clone(&self.server);
        let tool_name = name.clone();
        let execution =
            tokio::spawn(async move { server.execute_tool(&tool_name, arguments).await });

        match execution.await {
            Ok(Ok(result)) => Ok(to_call_tool_result(result)),
            Ok(Err(err @ RegistryError::UnknownTool(_))) => {
                warn!("{}", err);
                Err(CallToolError::unknown_tool(name))
            }
            Ok(Err(err)) => Err(CallToolError::new(err)),
            Err(err) => {
                error!("Tool '{}' terminated abnormally: {}", name, err);
                Ok(to_call_tool_result(ToolResult::error(format!(
                    "Tool '{name}' terminated unexpectedly"
                ))))
            }
        }
    }

    /// Serve MCP over stdin/stdout until the client disconnects.
    pub async fn run_stdio(self) -> Result<(), ServeError> {
        info!("Elasticsearch MCP server ready for stdio communication");
        info!("Available tools: {:?}", self.server.registry().names());

        let server_details = self.initialize_result();
        let transport = StdioTransport::new(TransportOptions::default())
            .map_err(|err| ServeError::Transport(err.to_string()))?;

        let runtime: Arc<ServerRuntime> = server_runtime::create_server(McpServerOptions {
            server_details,
            transport,
            handler: self.to_mcp_server_handler(),
            task_store: None,
            client_task_store: None,
        });

        runtime
            .start()
            .await
            .map_err(|err| ServeError::Runtime(err.to_string()))
    }
}

#[async_trait]
impl<S: StoreClient + 'static> ServerHandler for ElasticMcpHandler<S> {
    async fn handle_list_tools_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<ListToolsResult, RpcError> {
        self.list_tools()
            .map_err(|err| RpcError::internal_error().with_message(err.to_string()))
    }

    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        self.call_tool(params).await
    }
}

impl<S: StoreClient + 'static> ElasticMcpServer<S> {
    /// Run this server over stdin/stdout with the SDK runtime.
    pub async fn run_stdio(self) -> Result<(), ServeError> {
        ElasticMcpHandler::new(self).run_stdio().await
    }
}

/// Convert the envelope into the SDK's `tools/call` result
pub fn to_call_tool_result(result: ToolResult) -> CallToolResult {
    let content = result
        .content
        .iter()
        .map(|fragment| TextContent::from(fragment.as_text().to_string()))
        .collect();
    let mut call_result = CallToolResult::text_content(content);
    if result.is_error {
        call_result.is_error = Some(true);
    }
    call_result
}
