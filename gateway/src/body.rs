//! JSON body decoding for requests dispatched under `/api`.

use axum::{
    body::Body,
    http::{header, HeaderMap},
};
use serde_json::Value;

use crate::error::GatewayError;

/// Read and decode a request body.
///
/// Empty bodies decode to `None`. A non-empty body must be declared as
/// `application/json` and hold a top-level object or array.
pub async fn decode_json(
    headers: &HeaderMap,
    body: Body,
    limit: usize,
) -> Result<Option<Value>, GatewayError> {
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|err| {
            if is_length_limit(&err) {
                GatewayError::PayloadTooLarge { limit }
            } else {
                GatewayError::BodyRead(err)
            }
        })?;

    if bytes.is_empty() {
        return Ok(None);
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    if !content_type.is_some_and(is_json) {
        return Err(GatewayError::UnsupportedBody {
            content_type: content_type.map(str::to_string),
        });
    }

    parse_strict(&bytes).map(Some)
}

/// Whether a `Content-Type` value names `application/json`, ignoring case
/// and parameters such as `charset`.
pub fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
}

/// Parse JSON whose top-level value is an object or an array.
fn parse_strict(bytes: &[u8]) -> Result<Value, GatewayError> {
    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    if !matches!(first, Some(b'{') | Some(b'[')) {
        return Err(GatewayError::InvalidJson(
            "top-level value must be an object or an array".to_string(),
        ));
    }
    serde_json::from_slice(bytes).map_err(|err| GatewayError::InvalidJson(err.to_string()))
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(current) = source {
        if current.is::<http_body_util::LengthLimitError>() {
            return true;
        }
        source = current.source();
    }
    false
}
