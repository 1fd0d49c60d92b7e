//! Error types for the Elasticsearch MCP server.
//!
//! Each concern gets its own error enum so that callers can tell a fatal
//! startup problem ([`ConfigError`]) apart from a recoverable tool failure
//! ([`ToolError`]). Only [`ConfigError`] and [`RegistryError`] ever reach the
//! outer process; everything a tool handler produces is folded into a
//! [`ToolResult`](crate::mcp_integration::ToolResult) at the dispatch boundary.

/// Configuration errors detected before the server starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The store URL is missing or blank
    #[error("Elasticsearch URL cannot be empty")]
    EmptyUrl,

    /// The store URL does not parse as an absolute URL
    #[error("Invalid Elasticsearch URL format: {url}")]
    InvalidUrl { url: String },

    /// Contradictory authentication fields
    #[error(
        "Either ES_API_KEY or both ES_USERNAME and ES_PASSWORD must be provided, or no auth for local development"
    )]
    InvalidAuth,

    /// The CA certificate could not be read or parsed
    #[error("Failed to load CA certificate from '{path}': {message}")]
    CaCert { path: String, message: String },

    /// The HTTP client could not be constructed from the configuration
    #[error("Failed to build Elasticsearch client: {message}")]
    HttpClient { message: String },
}

/// Argument validation errors.
///
/// Paths use dotted notation for nested records and brackets for array
/// items, e.g. `script.source` or `operations[2].index`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Arguments were not a JSON object
    #[error("Arguments must be a JSON object, got {actual}")]
    NotAnObject { actual: String },

    /// Required argument is missing or null
    #[error("Required argument '{path}' is missing")]
    MissingRequired { path: String },

    /// Argument value doesn't match expected type
    #[error("Argument '{path}' has invalid type, expected {expected}, got {actual}")]
    InvalidType {
        path: String,
        expected: String,
        actual: String,
    },

    /// String argument must not be empty
    #[error("Argument '{path}' cannot be empty")]
    EmptyString { path: String },

    /// Value outside of an enumerated set
    #[error("Argument '{path}' has invalid value '{value}', allowed values: {allowed:?}")]
    InvalidEnumValue {
        path: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Integer below its lower bound
    #[error("Argument '{path}' must be at least {min}, got {actual}")]
    BelowMinimum { path: String, min: i64, actual: i64 },

    /// Array with too few items
    #[error("Argument '{path}' must contain at least {min} item(s), got {actual}")]
    TooFewItems {
        path: String,
        min: usize,
        actual: usize,
    },

    /// A bulk operation violates the action/field invariant
    #[error("Operation #{position} ({action}): {message}")]
    InvalidBulkOperation {
        position: usize,
        action: String,
        message: String,
    },

    /// Validated arguments could not be decoded into the handler's type
    #[error("Invalid arguments: {message}")]
    Decode { message: String },
}

impl ValidationError {
    /// Create a missing-argument error
    pub fn missing_required(path: impl Into<String>) -> Self {
        Self::MissingRequired { path: path.into() }
    }

    /// Create a type-mismatch error
    pub fn invalid_type(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidType {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a bulk invariant violation for the 1-based `position`
    pub fn bulk_operation(
        position: usize,
        action: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidBulkOperation {
            position,
            action: action.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while building or querying the tool catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A tool with the same name has already been registered
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    /// No tool with this name exists
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Failures of a call against the remote store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response (connect, timeout, TLS, ...)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("{}", format_status_error(.status, .error_type.as_deref(), .reason.as_deref()))]
    Status {
        status: u16,
        error_type: Option<String>,
        reason: Option<String>,
    },

    /// The response body could not be decoded
    #[error("Invalid response from Elasticsearch: {0}")]
    Decode(#[from] serde_json::Error),
}

fn format_status_error(status: &u16, error_type: Option<&str>, reason: Option<&str>) -> String {
    match (error_type, reason) {
        (Some(error_type), Some(reason)) => format!("{error_type}: {reason}"),
        (Some(error_type), None) => error_type.to_string(),
        (None, Some(reason)) => reason.to_string(),
        (None, None) => format!("Elasticsearch responded with status {status}"),
    }
}

/// Everything a tool handler may fail with.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Arguments or bulk operations failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store call failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The store answered with a shape the handler cannot interpret
    #[error("Unexpected response from Elasticsearch: {0}")]
    Response(#[from] serde_json::Error),
}

/// Failures starting or running the stdio MCP runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServeError {
    /// stdin/stdout could not be attached as an MCP transport
    #[error("Failed to open stdio transport: {0}")]
    Transport(String),

    /// The MCP runtime stopped with an error
    #[error("MCP server stopped: {0}")]
    Runtime(String),
}

/// Result type for configuration validation
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for argument validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for store calls
pub type StoreResult<T> = Result<T, StoreError>;
