//! HTTP client for the Higeia backend.

use crate::config::ApiConfig;
use crate::envelope::record_values;
use crate::error::{ApiError, ApiResult, ValidationErrors};
use higeia_types::FetchParams;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// HTTP verbs used for submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMethod {
    Post,
    Put,
    Delete,
}

impl SubmitMethod {
    fn as_reqwest(self) -> Method {
        match self {
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Client for the Higeia HTTP API.
///
/// Cheap to share behind an `Arc`; the bearer token is interior state so
/// every store holding the client sees a login immediately.
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Creates a client from configuration.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;
        let token = Arc::new(RwLock::new(config.bearer_token.clone()));

        Ok(Self {
            config,
            http,
            token,
        })
    }

    /// Creates a client against the development backend.
    pub fn with_defaults() -> ApiResult<Self> {
        Self::new(ApiConfig::default())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Stores the bearer token sent with subsequent requests.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Signs in and keeps the returned token for subsequent requests.
    ///
    /// Persisting the token across launches is the embedder's concern.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        debug!("logging in as {email}");
        let response = self
            .http
            .post(self.url("login"))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("login request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("login rejected with status {status}");
            let message = message_from_body(&body)
                .unwrap_or_else(|| format!("login failed with status {}", status.as_u16()));
            return Err(ApiError::Auth(message));
        }

        let tokens: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Auth(format!("failed to parse login response: {e}")))?;

        *self.token.write().await = Some(tokens.access_token.clone());
        Ok(tokens.access_token)
    }

    /// Fetches a list endpoint and normalizes the response envelope.
    ///
    /// One attempt, no retry: a failure surfaces immediately and the
    /// caller decides what to show.
    pub async fn fetch(&self, path: &str, params: &FetchParams) -> ApiResult<Vec<Value>> {
        let body = self.fetch_value(path, params).await?;
        Ok(record_values(body))
    }

    /// Fetches an endpoint and returns the decoded body as-is.
    ///
    /// For aggregate endpoints whose bodies are not record lists.
    pub async fn fetch_value(&self, path: &str, params: &FetchParams) -> ApiResult<Value> {
        let url = self.url(path);
        debug!("GET {url}");
        let mut request = self.http.get(&url);
        if !params.is_empty() {
            request = request.query(params.pairs());
        }
        let response = self
            .authorized(request)
            .await
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error = error_from_response(status, response).await;
            warn!("GET {url} failed with status {status}");
            return Err(error);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("reading body from {url} failed: {e}")))?;
        decode_body(&body)
    }

    /// Submits a write and returns the decoded response body.
    ///
    /// An empty success body decodes to an empty object so callers treat
    /// every confirmation uniformly.
    pub async fn submit(
        &self,
        method: SubmitMethod,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        let url = self.url(path);
        debug!("{method:?} {url}");
        let mut request = self.http.request(method.as_reqwest(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self
            .authorized(request)
            .await
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error = error_from_response(status, response).await;
            warn!("{method:?} {url} rejected with status {status}");
            return Err(error);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("reading body from {url} failed: {e}")))?;
        decode_body(&body)
    }

    /// Joins the base URL and an endpoint path. Paths appear both with
    /// and without a leading slash across the app, so both are accepted.
    fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    async fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_ref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

fn decode_body(body: &str) -> ApiResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(format!("invalid JSON response: {e}")))
}

async fn error_from_response(status: StatusCode, response: Response) -> ApiError {
    let body = response.text().await.unwrap_or_default();
    error_from_body(status, &body)
}

/// Maps a non-success response to the richest error its body supports.
///
/// A client error whose body carries a structured `errors` map becomes
/// [`ApiError::Validation`]; everything else is [`ApiError::Server`] with
/// the body's `error` or `message` text when present.
fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    let value: Option<Value> = serde_json::from_str(body).ok();

    if status.is_client_error() {
        if let Some(errors) = value.as_ref().and_then(parse_validation) {
            if !errors.is_empty() {
                return ApiError::Validation(errors);
            }
        }
    }

    let message = value
        .as_ref()
        .and_then(message_from_value)
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
    ApiError::Server {
        status: status.as_u16(),
        message,
    }
}

fn parse_validation(value: &Value) -> Option<ValidationErrors> {
    value.get("errors")?.as_object()?;
    serde_json::from_value(value.clone()).ok()
}

fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(message_from_value)
}

fn message_from_value(value: &Value) -> Option<String> {
    for key in ["error", "message"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}
