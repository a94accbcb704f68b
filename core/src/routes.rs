//! The capability the gateway delegates `/api` traffic to.
//!
//! # Design
//! A route table is opaque to the gateway: it receives a `RequestContext` and
//! either answers, declines (`Ok(None)`, rendered as 404), or fails. It may
//! await its own I/O; the gateway imposes no timeout.

use async_trait::async_trait;

use crate::error::RouteError;
use crate::http::{ApiResponse, RequestContext};

/// Route table mounted under `/api`.
#[async_trait]
pub trait RouteTable: Send + Sync {
    async fn dispatch(&self, ctx: RequestContext) -> Result<Option<ApiResponse>, RouteError>;
}

/// A route table with no routes. Every `/api` request is unmatched.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRouteTable;

#[async_trait]
impl RouteTable for EmptyRouteTable {
    async fn dispatch(&self, _ctx: RequestContext) -> Result<Option<ApiResponse>, RouteError> {
        Ok(None)
    }
}
