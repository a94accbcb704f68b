//! Cross-origin policy.
//!
//! Requests from an allowed origin get the origin reflected together with
//! `Access-Control-Allow-Credentials: true`. Requests from any other origin
//! get no `Access-Control-Allow-*` header; the browser enforces the rest.
//! Every `OPTIONS` request is answered here with 200 and an empty body.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowCredentials, AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::AllowList;

/// CORS layer for requests whose origin is on the allow-list.
pub fn layer(allowed: &AllowList) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed
        .origins()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring allowed origin that is not a valid header value");
                None
            }
        })
        .collect();

    let credentialed = allowed.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(AllowCredentials::predicate(move |origin, _parts| {
            credentialed.contains(origin.as_bytes())
        }))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Answers `OPTIONS` requests that [`layer`] must not decorate.
///
/// Preflights from an allowed origin continue to the CORS layer, which
/// replies itself. Everything else is a bare 200.
pub async fn preflight_guard(
    State(allowed): State<Arc<AllowList>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }

    let origin_allowed = request
        .headers()
        .get(header::ORIGIN)
        .is_some_and(|origin| allowed.contains(origin.as_bytes()));

    if origin_allowed {
        next.run(request).await
    } else {
        StatusCode::OK.into_response()
    }
}
