//! Tactix server binary.
//!
//! Listens on `TACTIX_ADDR` (default `127.0.0.1:8080`). Log verbosity
//! follows `RUST_LOG`, defaulting to `info`.

use tactix::{TactixError, TactixServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), TactixError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("TACTIX_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let server = TactixServer::builder().bind(&addr).build().await?;
    tracing::info!(%addr, "Tactix listening");
    server.run().await
}
