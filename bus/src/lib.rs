//! Agent message bus - append-only topic logs for agent-to-agent messaging.
//!
//! Clients append short messages to named, independently-ordered logs
//! ("topics") and later retrieve ranges of those messages by index or by
//! timestamp. Each topic is persisted as one JSON container under a
//! configured storage root; appends rewrite the whole container through
//! an atomic file swap, and a per-topic lock serializes writers so
//! indices stay contiguous under concurrency.
//!
//! # Key Concepts
//!
//! - **MessageBus**: the facade exposing the five bus operations
//!   (send, read-from-index, read-since-timestamp, topic length, topic
//!   listing).
//! - **Indices**: zero-based, contiguous per topic, assigned at append
//!   time as the topic's current length. The index is the ordering
//!   authority.
//! - **Timestamps**: epoch milliseconds assigned by the store, never by
//!   the caller; non-decreasing but not strictly increasing.
//!
//! # Example
//!
//! ```ignore
//! use bus::{Config, MessageBus, ReadFrom, SendMessage};
//!
//! let bus = MessageBus::open(Config::default()).await?;
//!
//! let receipt = bus
//!     .send_message(SendMessage {
//!         handle: Some("scout".to_string()),
//!         body: Some("found the cache".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let entries = bus
//!     .read_from(ReadFrom { start_index: receipt.index, topic: None })
//!     .await?;
//! assert_eq!(entries[0].message.body, "found the cache");
//! ```

mod bus;
mod config;
mod error;
mod log;
mod model;
#[cfg(feature = "http-server")]
pub mod server;
mod storage;
mod topic;

pub use bus::{MessageBus, ReadFrom, ReadSince, SendMessage};
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Entry, Index, Message, Receipt, TimestampMs, TopicLength, TopicListing};
pub use topic::TopicName;
