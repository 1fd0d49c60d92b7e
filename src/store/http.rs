//! HTTP implementation of [`StoreClient`] backed by `reqwest`.
//!
//! Every request path is decorated with the configured path prefix by plain
//! string concatenation (`prefix + path`). No separators are added or
//! collapsed, so a prefix of `/proxy` turns `/_search` into `/proxy/_search`
//! and a prefix of `/proxy/` turns it into `/proxy//_search`.

use super::{BulkRequest, DeleteByQueryParams, StoreClient, UpdateByQueryParams};
use crate::config::{AuthMode, StoreConfig, StoreVersion};
use crate::error::{ConfigError, ConfigResult, StoreError, StoreResult};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{
    Certificate, Client, Method, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::time::sleep;

const BASE_RETRY_DELAY_MS: u64 = 100;

enum RequestBody {
    Json(Value),
    NdJson(String),
}

/// Store client speaking the Elasticsearch REST API.
#[derive(Debug, Clone)]
pub struct HttpStoreClient {
    client: Client,
    base_url: String,
    path_prefix: Option<String>,
    auth: AuthMode,
    version: StoreVersion,
}

impl HttpStoreClient {
    /// Build a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CaCert`] if the CA certificate cannot be loaded
    /// and [`ConfigError::HttpClient`] if the TLS stack rejects the settings.
    pub fn new(config: &StoreConfig) -> ConfigResult<Self> {
        let mut builder = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("elastic-mcp-server/", env!("CARGO_PKG_VERSION")));

        if let Some(path) = &config.ca_cert {
            let display = path.display().to_string();
            let pem = std::fs::read(path).map_err(|e| ConfigError::CaCert {
                path: display.clone(),
                message: e.to_string(),
            })?;
            let cert = Certificate::from_pem(&pem).map_err(|e| ConfigError::CaCert {
                path: display,
                message: e.to_string(),
            })?;
            builder = builder.add_root_certificate(cert);
        }

        if config.ssl_skip_verify {
            warn!("TLS certificate verification is disabled for {}", config.url);
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| ConfigError::HttpClient {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: config.url.as_str().trim_end_matches('/').to_string(),
            path_prefix: config.path_prefix.clone(),
            auth: config.auth.clone(),
            version: config.version,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.base_url,
            apply_path_prefix(self.path_prefix.as_deref(), path)
        )
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<RequestBody>,
    ) -> StoreResult<Value> {
        let url = self.endpoint(path);
        let max_retries = self.version.max_retries();
        let mut attempt = 0;

        loop {
            debug!("{} {} (attempt {})", method, url, attempt + 1);
            let mut request = self
                .client
                .request(method.clone(), &url)
                .header(ACCEPT, self.version.json_media_type())
                .query(query);

            request = match &self.auth {
                AuthMode::ApiKey(key) => request.header(AUTHORIZATION, AuthMode::api_key_header(key)),
                AuthMode::Basic { username, password } => {
                    request.basic_auth(username, Some(password))
                }
                AuthMode::None => request,
            };

            request = match &body {
                Some(RequestBody::Json(value)) => request
                    .header(CONTENT_TYPE, self.version.json_media_type())
                    .body(value.to_string()),
                Some(RequestBody::NdJson(text)) => request
                    .header(CONTENT_TYPE, self.version.ndjson_media_type())
                    .body(text.clone()),
                None => request,
            };

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) if attempt < max_retries && (err.is_connect() || err.is_timeout()) => {
                    attempt += 1;
                    warn!("Request to {url} failed ({err}), retrying");
                    sleep(retry_delay(attempt)).await;
                    continue;
                }
                Err(err) => return Err(StoreError::Transport(err)),
            };

            let status = response.status();
            if is_retryable_status(status) && attempt < max_retries {
                attempt += 1;
                warn!("Request to {url} returned {status}, retrying");
                sleep(retry_delay(attempt)).await;
                continue;
            }

            let text = response.text().await?;
            if !status.is_success() {
                return Err(status_error(status.as_u16(), &text));
            }
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text)?);
        }
    }

    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> StoreResult<Value> {
        self.send(Method::GET, path, query, None).await
    }
}

#[async_trait]
impl StoreClient for HttpStoreClient {
    async fn list_indices(&self, pattern: &str) -> StoreResult<Value> {
        let path = format!("/_cat/indices/{}", encode_segment(pattern));
        self.get(&path, &[("format", "json".to_string())]).await
    }

    async fn get_mapping(&self, index: &str) -> StoreResult<Value> {
        self.get(&format!("/{}/_mapping", encode_segment(index)), &[])
            .await
    }

    async fn search(&self, index: &str, body: Value) -> StoreResult<Value> {
        let path = format!("/{}/_search", encode_segment(index));
        self.send(Method::POST, &path, &[], Some(RequestBody::Json(body)))
            .await
    }

    async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        document: Value,
    ) -> StoreResult<Value> {
        let body = Some(RequestBody::Json(document));
        match id {
            Some(id) => {
                let path = format!("/{}/_doc/{}", encode_segment(index), encode_segment(id));
                self.send(Method::PUT, &path, &[], body).await
            }
            None => {
                let path = format!("/{}/_doc", encode_segment(index));
                self.send(Method::POST, &path, &[], body).await
            }
        }
    }

    async fn update_document(&self, index: &str, id: &str, partial: Value) -> StoreResult<Value> {
        let path = format!("/{}/_update/{}", encode_segment(index), encode_segment(id));
        let body = json!({ "doc": partial });
        self.send(Method::POST, &path, &[], Some(RequestBody::Json(body)))
            .await
    }

    async fn delete_document(&self, index: &str, id: &str) -> StoreResult<Value> {
        let path = format!("/{}/_doc/{}", encode_segment(index), encode_segment(id));
        self.send(Method::DELETE, &path, &[], None).await
    }

    async fn update_by_query(&self, params: UpdateByQueryParams) -> StoreResult<Value> {
        let path = format!("/{}/_update_by_query", encode_segment(&params.index));
        self.send(
            Method::POST,
            &path,
            &params.query_string(),
            Some(RequestBody::Json(params.body())),
        )
        .await
    }

    async fn delete_by_query(&self, params: DeleteByQueryParams) -> StoreResult<Value> {
        let path = format!("/{}/_delete_by_query", encode_segment(&params.index));
        self.send(
            Method::POST,
            &path,
            &params.query_string(),
            Some(RequestBody::Json(params.body())),
        )
        .await
    }

    async fn bulk(&self, request: BulkRequest) -> StoreResult<Value> {
        self.send(
            Method::POST,
            "/_bulk",
            &request.query_string(),
            Some(RequestBody::NdJson(request.to_ndjson())),
        )
        .await
    }

    async fn create_index(&self, index: &str, body: Value) -> StoreResult<Value> {
        let path = format!("/{}", encode_segment(index));
        self.send(Method::PUT, &path, &[], Some(RequestBody::Json(body)))
            .await
    }

    async fn delete_index(&self, index: &str) -> StoreResult<Value> {
        let path = format!("/{}", encode_segment(index));
        self.send(Method::DELETE, &path, &[], None).await
    }

    async fn count(&self, index: &str, query: Option<Value>) -> StoreResult<Value> {
        let path = format!("/{}/_count", encode_segment(index));
        let body = query.map(|q| RequestBody::Json(json!({ "query": q })));
        self.send(Method::POST, &path, &[], body).await
    }

    async fn get_index_templates(&self, name: Option<&str>) -> StoreResult<Value> {
        self.get(&optional_segment("/_index_template", name), &[])
            .await
    }

    async fn get_aliases(&self, name: Option<&str>) -> StoreResult<Value> {
        self.get(&optional_segment("/_alias", name), &[]).await
    }

    async fn cluster_health(&self) -> StoreResult<Value> {
        self.get("/_cluster/health", &[]).await
    }

    async fn cat_shards(&self, index: Option<&str>) -> StoreResult<Value> {
        self.get(
            &optional_segment("/_cat/shards", index),
            &[("format", "json".to_string())],
        )
        .await
    }
}

/// Prepend `prefix` to `path` verbatim.
pub fn apply_path_prefix(prefix: Option<&str>, path: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{path}"),
        None => path.to_string(),
    }
}

/// Percent-encode one dynamic path segment.
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn optional_segment(base: &str, segment: Option<&str>) -> String {
    match segment.filter(|s| !s.trim().is_empty()) {
        Some(segment) => format!("{base}/{}", encode_segment(segment)),
        None => base.to_string(),
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(u64::from(attempt) * BASE_RETRY_DELAY_MS)
}

/// Build a [`StoreError::Status`] from an error response body.
///
/// Understands `{"error": {"type", "reason"}}`, `{"error": "text"}` and
/// `{"result": "not_found"}` bodies; anything else leaves both fields empty.
fn status_error(status: u16, body: &str) -> StoreError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let (error_type, reason) = match parsed.as_ref().and_then(|v| v.get("error")) {
        Some(Value::Object(error)) => (
            error.get("type").and_then(Value::as_str).map(str::to_string),
            error.get("reason").and_then(Value::as_str).map(str::to_string),
        ),
        Some(Value::String(message)) => (None, Some(message.clone())),
        _ => (
            None,
            parsed
                .as_ref()
                .and_then(|v| v.get("result"))
                .and_then(Value::as_str)
                .map(str::to_string),
        ),
    };
    StoreError::Status {
        status,
        error_type,
        reason,
    }
}
