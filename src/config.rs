//! Connection and authentication configuration.
//!
//! Configuration is read once from the environment into a [`RawConfig`],
//! validated into an immutable [`StoreConfig`], and then shared by the store
//! client for the lifetime of the session.
//!
//! # Authentication modes
//!
//! Exactly one of the following shapes is accepted:
//!
//! - API key only ([`AuthMode::ApiKey`])
//! - username and password together ([`AuthMode::Basic`])
//! - no credentials at all ([`AuthMode::None`]), intended for local development
//!
//! ```rust
//! use elastic_mcp_server::config::{AuthMode, RawConfig};
//!
//! let config = RawConfig {
//!     url: Some("http://localhost:9200".to_string()),
//!     api_key: Some("bG9jYWw6a2V5".to_string()),
//!     ..RawConfig::default()
//! }
//! .validate()
//! .unwrap();
//!
//! assert!(matches!(config.auth, AuthMode::ApiKey(_)));
//! ```

use crate::error::{ConfigError, ConfigResult};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::{env, path::PathBuf, time::Duration};
use url::Url;

const ENV_URL: &str = "ES_URL";
const ENV_API_KEY: &str = "ES_API_KEY";
const ENV_USERNAME: &str = "ES_USERNAME";
const ENV_PASSWORD: &str = "ES_PASSWORD";
const ENV_CA_CERT: &str = "ES_CA_CERT";
const ENV_VERSION: &str = "ES_VERSION";
const ENV_SSL_SKIP_VERIFY: &str = "ES_SSL_SKIP_VERIFY";
const ENV_PATH_PREFIX: &str = "ES_PATH_PREFIX";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Unvalidated configuration as supplied by the operator.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ca_cert: Option<String>,
    pub path_prefix: Option<String>,
    pub version: Option<String>,
    pub ssl_skip_verify: Option<bool>,
}

impl RawConfig {
    /// Read configuration from `ES_*` environment variables.
    ///
    /// Blank values are treated as absent.
    pub fn from_env() -> Self {
        Self {
            url: env_string(ENV_URL),
            api_key: env_string(ENV_API_KEY),
            username: env_string(ENV_USERNAME),
            password: env_string(ENV_PASSWORD),
            ca_cert: env_string(ENV_CA_CERT),
            path_prefix: env_string(ENV_PATH_PREFIX),
            version: env_string(ENV_VERSION),
            ssl_skip_verify: env_string(ENV_SSL_SKIP_VERIFY).map(|v| parse_flag(&v)),
        }
    }

    /// Validate into a [`StoreConfig`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyUrl`] if the URL is absent or blank
    /// - [`ConfigError::InvalidUrl`] if the URL is not absolute
    /// - [`ConfigError::InvalidAuth`] unless exactly one auth shape holds
    pub fn validate(self) -> ConfigResult<StoreConfig> {
        let url = non_blank(self.url).ok_or(ConfigError::EmptyUrl)?;
        let url = Url::parse(url.trim()).map_err(|_| ConfigError::InvalidUrl { url: url.clone() })?;

        let auth = AuthMode::resolve(
            non_blank(self.api_key),
            non_blank(self.username),
            non_blank(self.password),
        )?;

        Ok(StoreConfig {
            url,
            auth,
            ca_cert: non_blank(self.ca_cert).map(PathBuf::from),
            path_prefix: non_blank(self.path_prefix),
            version: StoreVersion::normalize(self.version.as_deref()),
            ssl_skip_verify: self.ssl_skip_verify.unwrap_or(false),
        })
    }
}

/// Validated, immutable store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: Url,
    pub auth: AuthMode,
    pub ca_cert: Option<PathBuf>,
    /// Prepended verbatim to every outgoing request path
    pub path_prefix: Option<String>,
    pub version: StoreVersion,
    pub ssl_skip_verify: bool,
}

impl StoreConfig {
    /// Configuration for an unauthenticated local node.
    pub fn local(url: Url) -> Self {
        Self {
            url,
            auth: AuthMode::None,
            ca_cert: None,
            path_prefix: None,
            version: StoreVersion::default(),
            ssl_skip_verify: false,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        REQUEST_TIMEOUT
    }
}

/// How requests authenticate against the store.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    ApiKey(String),
    Basic { username: String, password: String },
    None,
}

impl AuthMode {
    fn resolve(
        api_key: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> ConfigResult<Self> {
        match (api_key, username, password) {
            (Some(key), None, None) => Ok(Self::ApiKey(key)),
            (None, Some(username), Some(password)) => Ok(Self::Basic { username, password }),
            (None, None, None) => Ok(Self::None),
            _ => Err(ConfigError::InvalidAuth),
        }
    }

    /// Value for the `Authorization` header when using an API key.
    ///
    /// Keys given as `id:secret` are encoded; pre-encoded keys pass through.
    pub fn api_key_header(key: &str) -> String {
        if key.contains(':') {
            format!("ApiKey {}", STANDARD.encode(key))
        } else {
            format!("ApiKey {key}")
        }
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(***)"),
            Self::Basic { username, .. } => write!(f, "Basic({username}:***)"),
            Self::None => f.write_str("None"),
        }
    }
}

/// Major version of the store's REST API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreVersion {
    #[default]
    V8,
    V9,
}

impl StoreVersion {
    /// Any value other than `"8"` or `"9"` falls back to 8.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("9") => Self::V9,
            _ => Self::V8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V8 => "8",
            Self::V9 => "9",
        }
    }

    /// Media type for JSON request and response bodies
    pub fn json_media_type(&self) -> &'static str {
        match self {
            Self::V8 => "application/vnd.elasticsearch+json;compatible-with=8",
            Self::V9 => "application/json",
        }
    }

    /// Media type for newline-delimited bulk bodies
    pub fn ndjson_media_type(&self) -> &'static str {
        match self {
            Self::V8 => "application/vnd.elasticsearch+x-ndjson;compatible-with=8",
            Self::V9 => "application/x-ndjson",
        }
    }

    /// Retries after the first attempt for transient failures
    pub fn max_retries(&self) -> u32 {
        match self {
            Self::V8 => 5,
            Self::V9 => 3,
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|v| non_blank(Some(v)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
