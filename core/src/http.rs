//! Request and response values exchanged with a route table.
//!
//! # Design
//! These types describe one dispatched request and its answer as plain data.
//! The gateway builds a `RequestContext` after CORS handling and body
//! decoding, so `body` already holds parsed JSON. A `RequestContext` is owned
//! by exactly one dispatch and dropped when the response is sent.

use serde::Serialize;
use serde_json::Value;

/// HTTP method of a dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    /// Never dispatched by the gateway: every `OPTIONS` request is answered by
    /// its CORS handling before routing.
    Options,
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Other(method) => method,
        }
    }
}

impl From<&str> for HttpMethod {
    fn from(method: &str) -> Self {
        match method {
            "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "OPTIONS" => HttpMethod::Options,
            other => HttpMethod::Other(other.to_string()),
        }
    }
}

/// A request forwarded to the route table mounted under `/api`.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: HttpMethod,
    /// Path below the `/api` mount point, always starting with `/`.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// Header names are lowercase. Values that are not valid UTF-8 are dropped.
    pub headers: Vec<(String, String)>,
    /// Decoded JSON payload, `None` when the request carried no body.
    pub body: Option<Value>,
}

impl RequestContext {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Case-insensitive header lookup returning the first value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The answer a route table gives for a matched request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    /// A response with a status and no body, e.g. 204.
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Serialize any DTO into the response body.
    pub fn json<T: Serialize>(status: u16, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(status, serde_json::to_value(body)?))
    }
}
