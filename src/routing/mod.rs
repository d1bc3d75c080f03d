//! Request routing for calcd endpoints.

mod router;

pub use router::{Route, RoutePattern, Router};
