//! calcd binary entry point.

use calcd::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting calcd...");

    let host = std::env::var("CALCD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("CALCD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let config = CalcConfig::new().host(host).port(port);
    let server = CalcServer::new(config, Router::standard());

    tracing::info!("Registered endpoints: /factorial, /fibonacci, /mean");
    tracing::info!("Try: curl 'http://localhost:{}/factorial?n=10'", port);
    tracing::info!("Try: curl http://localhost:{}/fibonacci/10", port);
    tracing::info!(
        "Try: curl -X GET -d '[1, 2, 3]' http://localhost:{}/mean",
        port
    );

    server.run().await
}
