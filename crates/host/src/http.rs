//! The HTTP transport seam between nodes and the host.
//!
//! Nodes construct an [`HttpRequest`] and hand it to whatever
//! [`HttpTransport`] the engine wired into the execution context. Production
//! runs use [`ReqwestTransport`]; tests script a
//! [`MockTransport`](crate::mock::MockTransport).

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::NodeError;

/// HTTP verbs a node may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as `application/json`.
    Json(Value),
    /// Serialized as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

/// A fully-constructed outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Value of the first header matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response body as the host hands it to a node.
///
/// Bodies served with a JSON content type arrive pre-parsed; anything else
/// arrives as text; a zero-length body arrives as `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Empty,
}

/// A completed upstream response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl HttpResponse {
    pub fn ok(body: ResponseBody) -> Self {
        Self { status: 200, body }
    }
}

/// The host's HTTP request capability.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue `request` and wait for the response.
    ///
    /// # Errors
    /// Returns [`NodeError::Transport`] for connection failures and
    /// non-success status codes.
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, NodeError>;
}

/// Production transport over a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap an existing client so connection pools can be shared.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, NodeError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            Some(RequestBody::Json(ref value)) => builder.json(value),
            Some(RequestBody::Form(ref pairs)) => builder.form(pairs),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| NodeError::Transport(e.to_string()))?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));

        let text = response
            .text()
            .await
            .map_err(|e| NodeError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(NodeError::Transport(format!(
                "{} {} returned status {}: {}",
                request.method, request.url, status, text
            )));
        }

        debug!(url = %request.url, status = status.as_u16(), "request completed");

        let body = if text.is_empty() {
            ResponseBody::Empty
        } else if is_json {
            match serde_json::from_str(&text) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Text(text),
            }
        } else {
            ResponseBody::Text(text)
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
