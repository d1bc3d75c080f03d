//! HTTP types for calcd handlers, independent of the hyper transport.

mod request;
mod response;

pub use request::{CalcRequest, Method};
pub use response::{CalcResponse, StatusCode};
