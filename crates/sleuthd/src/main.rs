//! Sleuth Daemon - email intelligence lookup service.
//!
//! Serves the lookup UI, proxies lookups to IntelBase and returns the
//! normalized result.

use anyhow::Result;
use sleuthd::config::Config;
use sleuthd::server::{self, AppState};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("sleuthd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let state = AppState::new(config)?;

    server::run(state).await
}
