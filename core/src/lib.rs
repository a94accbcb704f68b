//! Transport-independent core of the request gateway.
//!
//! # Overview
//! Describes what the gateway hands to a delegated route table and what it
//! expects back, as plain data. The gateway crate owns the network, CORS and
//! body decoding; a route table only ever sees a `RequestContext` and answers
//! with an `ApiResponse`, nothing, or a `RouteError`.
//!
//! # Design
//! - `RouteTable` is the single seam between the gateway and business routes.
//!   `Ok(None)` means "no route here" and becomes the gateway's 404.
//! - Envelopes are defined here so route tables and the gateway serialize
//!   errors identically.
//! - Types use owned `String` / `Vec` fields and carry no framework types,
//!   so route tables do not link against axum.

pub mod error;
pub mod http;
pub mod routes;
pub mod types;

pub use error::RouteError;
pub use http::{ApiResponse, HttpMethod, RequestContext};
pub use routes::{EmptyRouteTable, RouteTable};
pub use types::{ErrorEnvelope, HealthEnvelope};
