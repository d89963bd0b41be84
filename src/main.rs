//! Sticker notes REST service.
//!
//! Usage:
//!   stickers --host 0.0.0.0 --port 5000
//!
//! The store is volatile: stickers live only as long as the process.

use std::sync::Arc;

use clap::Parser;
use stickers::config::ServerConfig;
use stickers::{logging, web, CancellationToken, InMemoryDataAccessor};
use tracing::{error, info};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::parse();
    logging::init(config.verbose);

    info!("stickers service starting");
    let dac = Arc::new(InMemoryDataAccessor::new());
    let shutdown = CancellationToken::new();

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("shutdown requested");
                    shutdown.cancel();
                }
                Err(e) => error!("failed to listen for ctrl-c: {}", e),
            }
        }
    });

    web::serve(dac, &config.addr(), shutdown).await?;
    info!("stickers service stopped");
    Ok(())
}
