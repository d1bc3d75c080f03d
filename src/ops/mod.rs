//! Calcd computation handlers.
//!
//! Each endpoint is a stateless unit struct implementing [`CalcHandler`];
//! validation failures are expressed as [`CalcError`] values and never
//! escape as panics or transport errors.

pub mod factorial;
pub mod fibonacci;
pub mod handler;
pub mod mean;

pub use factorial::FactorialHandler;
pub use fibonacci::FibonacciHandler;
pub use handler::{CalcError, CalcHandler, RequestContext};
pub use mean::MeanHandler;
