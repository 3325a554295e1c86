//! Configuration for opening a [`MessageBus`](crate::MessageBus).

use std::path::PathBuf;

/// Configuration for a message bus instance.
///
/// The storage root is explicit configuration rather than ambient process
/// state so that multiple bus instances can coexist (e.g. in tests, each
/// against its own temporary directory).
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one JSON container per topic.
    pub data_dir: PathBuf,

    /// Topic used when a request omits one.
    pub default_topic: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            default_topic: "general".to_string(),
        }
    }
}
