//! Calcd runtime: server configuration and the hyper-based HTTP server.

mod config;
mod server;

pub use config::CalcConfig;
pub use server::CalcServer;
