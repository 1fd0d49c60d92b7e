//! Tool catalogue and dispatch.
//!
//! The registry is built once through [`ToolRegistryBuilder`] and is
//! read-only afterwards. [`ToolRegistry::invoke`] is the hard catch boundary
//! for tool execution: schema violations and handler failures are both
//! turned into an error [`ToolResult`], so callers always receive an
//! envelope. Only a lookup of an unknown tool name returns `Err`.

use super::core::ToolResult;
use super::tools;
use crate::error::{RegistryError, ToolError};
use crate::schema::{ArgumentSchema, Arguments};
use crate::store::StoreClient;
use log::{debug, error, warn};
use serde_json::{Value, json};
use std::{collections::HashMap, fmt, future::Future, pin::Pin};

/// Future returned by a tool handler.
pub type HandlerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ToolResult, ToolError>> + Send + 'a>>;

/// Tool handler: validated arguments in, result envelope (or failure) out.
pub type ToolHandler = for<'a> fn(&'a dyn StoreClient, Arguments) -> HandlerFuture<'a>;

/// Wrap an `async fn(&dyn StoreClient, Arguments) -> Result<ToolResult, ToolError>`
/// into a [`ToolHandler`].
macro_rules! tool_handler {
    ($handler:path) => {{
        fn boxed<'a>(
            store: &'a dyn $crate::store::StoreClient,
            args: $crate::schema::Arguments,
        ) -> $crate::mcp_integration::registry::HandlerFuture<'a> {
            Box::pin($handler(store, args))
        }
        boxed
    }};
}
pub(crate) use tool_handler;

/// A named, schema-validated tool.
#[derive(Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: ArgumentSchema,
    pub handler: ToolHandler,
}

impl ToolDefinition {
    pub fn new(
        name: &'static str,
        description: &'static str,
        schema: ArgumentSchema,
        handler: ToolHandler,
    ) -> Self {
        Self {
            name,
            description,
            schema,
            handler,
        }
    }

    /// Descriptor published through `tools/list`
    pub fn descriptor(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.schema.to_json_schema(),
        })
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Collects tool definitions before the registry is frozen.
#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<ToolDefinition>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTool`] if the name is taken.
    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), RegistryError> {
        if self.by_name.contains_key(definition.name) {
            return Err(RegistryError::DuplicateTool(definition.name.to_string()));
        }
        self.by_name.insert(definition.name, self.tools.len());
        self.tools.push(definition);
        Ok(())
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry {
            tools: self.tools,
            by_name: self.by_name,
        }
    }
}

/// Immutable tool catalogue.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::new()
    }

    /// The fixed Elasticsearch tool catalogue.
    pub fn with_default_tools() -> Result<Self, RegistryError> {
        let mut builder = Self::builder();
        for definition in tools::catalogue() {
            builder.register(definition)?;
        }
        Ok(builder.build())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.by_name.get(name).map(|&i| &self.tools[i])
    }

    /// Definitions in registration order
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up, validate and execute a tool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownTool`] if no tool has this name.
    /// Validation and execution failures are returned as error envelopes.
    pub async fn invoke(
        &self,
        store: &dyn StoreClient,
        name: &str,
        arguments: Value,
    ) -> Result<ToolResult, RegistryError> {
        let tool = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))?;
        debug!("Executing MCP tool: {} with args: {}", name, arguments);

        let args = match tool.schema.validate(&arguments) {
            Ok(args) => args,
            Err(err) => {
                warn!("Rejected arguments for tool '{}': {}", name, err);
                return Ok(ToolResult::error(format!(
                    "Invalid arguments for tool '{name}': {err}"
                )));
            }
        };

        match (tool.handler)(store, args).await {
            Ok(result) => Ok(result),
            Err(ToolError::Validation(err)) => {
                warn!("Tool '{}' rejected its input: {}", name, err);
                Ok(ToolResult::error(err))
            }
            Err(err) => {
                error!("Tool '{}' failed: {}", name, err);
                Ok(ToolResult::error(err))
            }
        }
    }
}
