//! # calcd - numeric computation HTTP service
//!
//! calcd is a small asynchronous HTTP service exposing three numeric
//! computation endpoints behind an ordered request router. Each request
//! is an independent, stateless unit of work: buffer, validate, compute,
//! respond.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     CalcServer (hyper)                    │
//! │   buffer body ─▶ CalcRequest ─▶ Router ─▶ CalcHandler     │
//! │                                  │                        │
//! │              GET /factorial ─────┼──▶ FactorialHandler    │
//! │              GET /fibonacci/* ───┼──▶ FibonacciHandler    │
//! │              GET /mean ──────────┴──▶ MeanHandler         │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Successful computations answer `200` with a JSON body
//! `{"result": <value>}`; malformed input answers `422`, semantically
//! invalid input `400`, and unknown routes `404`, each with a fixed
//! plain-text body.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use calcd::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = CalcConfig::new().host("0.0.0.0").port(8000);
//!     let server = CalcServer::new(config, Router::standard());
//!     server.run().await
//! }
//! ```
//!
//! Custom handlers implement [`CalcHandler`](ops::CalcHandler) and are
//! registered on a [`Router`](routing::Router) in dispatch order.

pub mod http;
pub mod ops;
pub mod routing;
pub mod runtime;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::http::{CalcRequest, CalcResponse, Method, StatusCode};
    pub use crate::ops::{CalcError, CalcHandler, RequestContext};
    pub use crate::routing::{Route, RoutePattern, Router};
    pub use crate::runtime::{CalcConfig, CalcServer};
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use http::{CalcRequest, CalcResponse};
pub use ops::{CalcError, CalcHandler, RequestContext};
pub use routing::Router;
pub use runtime::{CalcConfig, CalcServer};
