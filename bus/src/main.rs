//! Message bus HTTP server binary entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bus::MessageBus;
use bus::server::{BusServer, BusServerConfig, CliArgs};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();

    let bus_config = args.to_bus_config();
    let server_config = BusServerConfig::from(&args);

    tracing::info!("Opening message bus with config: {:?}", bus_config);

    let bus = MessageBus::open(bus_config)
        .await
        .expect("Failed to open message bus");

    let server = BusServer::new(Arc::new(bus), server_config);
    server.run().await;
}
