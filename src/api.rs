use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::store::{KeyValueStore, TOKEN_KEY};
use crate::types::{CheckoutSession, GenerationRequest, PlanCatalog, PlanId};

/// Message used when an error response carries no usable `detail`.
pub const FALLBACK_ERROR: &str = "API error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection, DNS or body-read failure, passed through untouched.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// Any non-2xx answer from the service.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 2xx answer whose body does not have the expected shape.
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Client for the generation/billing service.
///
/// Every call re-reads the bearer token from the persistent store. There is
/// no retry, timeout or caching layer.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    pub fn new(config: &Config, tokens: Arc<dyn KeyValueStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.clone(),
            tokens,
        }
    }

    /// Issue a request against `base_url + path` and return the JSON body.
    ///
    /// The body is parsed whatever the status; unparsable bodies become `{}`.
    /// Non-2xx statuses turn into `ApiError::Status` carrying the body's
    /// `detail` or [`FALLBACK_ERROR`].
    pub async fn request(&self, path: &str, opts: RequestOptions) -> Result<Value, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let headers = self.build_headers(&opts.headers)?;

        tracing::debug!(method = %opts.method, %url, "api request");

        let mut req = self.http.request(opts.method, &url).headers(headers);
        if let Some(body) = opts.body {
            req = req.body(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        let data: Value =
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(Map::new()));

        if !status.is_success() {
            let message = error_message(&data);
            tracing::warn!(status = status.as_u16(), %url, "api error: {message}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(data)
    }

    pub async fn plans(&self) -> Result<PlanCatalog, ApiError> {
        let data = self.request("/billing/plans", RequestOptions::get()).await?;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn checkout(&self, plan: PlanId) -> Result<CheckoutSession, ApiError> {
        let path = format!("/billing/checkout?plan_id={plan}");
        let data = self.request(&path, RequestOptions::post()).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Returns the body untouched; callers persist it as received and decode
    /// a [`crate::types::GenerationResult`] view from it.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Value, ApiError> {
        let body = serde_json::to_string(request)?;
        self.request("/generate", RequestOptions::post().body(body))
            .await
    }

    /// Fixed content type, then caller headers (caller wins), then the
    /// bearer token when one is stored.
    fn build_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in extra {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        if let Some(token) = self.tokens.get(TOKEN_KEY).filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidHeader(AUTHORIZATION.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

/// Best-effort human message from an error body.
pub(crate) fn error_message(data: &Value) -> String {
    match data.get("detail") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        // request-validation errors arrive as a list of objects
        Some(detail @ (Value::Array(_) | Value::Object(_))) => detail.to_string(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => FALLBACK_ERROR.to_string(),
    }
}
