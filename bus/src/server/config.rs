//! Server configuration and CLI arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Command-line arguments for the bus server binary.
#[derive(Debug, Parser)]
#[command(name = "bus-server", about = "Agent message bus HTTP server")]
pub struct CliArgs {
    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Directory holding topic containers.
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Topic used when requests omit one.
    #[arg(long, default_value = "general")]
    pub default_topic: String,
}

impl CliArgs {
    /// Builds the bus configuration from these arguments.
    pub fn to_bus_config(&self) -> Config {
        Config {
            data_dir: self.data_dir.clone(),
            default_topic: self.default_topic.clone(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct BusServerConfig {
    pub port: u16,
}

impl From<&CliArgs> for BusServerConfig {
    fn from(args: &CliArgs) -> Self {
        Self { port: args.port }
    }
}
