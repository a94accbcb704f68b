use std::any::Any;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use gateway_core::{ApiResponse, ErrorEnvelope, HealthEnvelope, HttpMethod, RequestContext};

use crate::body;
use crate::error::{self, GatewayError, Result};
use crate::AppState;

pub async fn health(State(state): State<AppState>) -> Json<HealthEnvelope> {
    Json(HealthEnvelope::ok(state.config.environment.as_str()))
}

/// Everything that is not `/health`: `/api` goes to the route table, the
/// rest is not found.
pub async fn fallback(State(state): State<AppState>, request: Request) -> Result<Response> {
    let Some(path) = api_path(request.uri().path()) else {
        return Ok(not_found());
    };

    let (parts, body) = request.into_parts();
    let payload = body::decode_json(&parts.headers, body, state.config.body_limit).await?;

    let ctx = RequestContext {
        method: HttpMethod::from(parts.method.as_str()),
        path,
        query: parts.uri.query().map(str::to_string),
        headers: collect_headers(&parts.headers),
        body: payload,
    };

    match state.routes.dispatch(ctx).await? {
        Some(response) => render(response),
        None => Ok(not_found()),
    }
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorEnvelope::not_found())).into_response()
}

/// Responder for panics caught below the CORS layer.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.as_str()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = %detail, "Server error");
    error::internal_error()
}

/// Path below the `/api` mount point, or `None` for paths outside it.
pub fn api_path(path: &str) -> Option<String> {
    if path == "/api" {
        return Some("/".to_string());
    }
    path.strip_prefix("/api/").map(|rest| format!("/{rest}"))
}

fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

fn render(response: ApiResponse) -> Result<Response> {
    let status = StatusCode::from_u16(response.status)
        .map_err(|_| GatewayError::InvalidStatus(response.status))?;
    Ok(match response.body {
        Some(body) => (status, Json(body)).into_response(),
        None => status.into_response(),
    })
}
