//! Fault boundary between request handling and the client.
//!
//! Every fault becomes the same 500 envelope. The cause goes to the log, not
//! to the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gateway_core::{ErrorEnvelope, RouteError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("invalid JSON payload: {0}")]
    InvalidJson(String),

    #[error("unsupported request body (content type: {content_type:?})")]
    UnsupportedBody { content_type: Option<String> },

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("route table returned invalid status code {0}")]
    InvalidStatus(u16),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Server error");
        internal_error()
    }
}

/// The generic 500 response.
pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope::internal()),
    )
        .into_response()
}
