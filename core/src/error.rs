//! Error type raised by route tables.
//!
//! # Design
//! Route tables report faults; they never choose the client-facing message.
//! The gateway records the cause and answers with the generic 500 envelope,
//! so the text carried here is for operators only.

use thiserror::Error;

/// A fault raised while a route table handled a request.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The handler failed for a reason it describes in prose.
    #[error("route handler failed: {0}")]
    Failed(String),

    /// A payload could not be converted to or from JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RouteError {
    pub fn failed(msg: impl Into<String>) -> Self {
        RouteError::Failed(msg.into())
    }
}
