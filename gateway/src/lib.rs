//! HTTP request gateway.
//!
//! Applies the cross-origin policy, answers `/health`, decodes JSON bodies
//! for `/api` and hands them to a [`RouteTable`]. Unmatched paths get a 404
//! envelope and every fault gets the same generic 500 envelope.

use std::sync::Arc;

use axum::{middleware, routing::any, Router};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod body;
pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod logging;

pub use config::{AllowList, Environment, GatewayConfig, LogFormat};
pub use error::GatewayError;
pub use gateway_core::RouteTable;

/// Shared, read-only state of every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub routes: Arc<dyn RouteTable>,
}

pub fn app(config: Arc<GatewayConfig>, routes: Arc<dyn RouteTable>) -> Router {
    let allowed = Arc::new(config.allowed_origins.clone());
    let cors_layer = cors::layer(&allowed);
    let state = AppState { config, routes };

    // Requests pass trace, preflight guard, CORS and the panic boundary, in that order.
    // Faults are logged once, by `GatewayError` or `panic_response`, not by the trace layer.
    Router::new()
        .route("/health", any(handlers::health))
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(cors_layer)
        .layer(middleware::from_fn_with_state(allowed, cors::preflight_guard))
        .layer(TraceLayer::new_for_http().on_failure(()))
}

pub async fn run(
    listener: TcpListener,
    config: Arc<GatewayConfig>,
    routes: Arc<dyn RouteTable>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config, routes)).await
}
