//! The message bus facade.
//!
//! [`MessageBus`] is the single entry point used by protocol adapters. It
//! exposes the five bus operations, resolves the target topic (falling
//! back to the configured default), validates requests at the boundary,
//! and owns the concurrency discipline: appends to one topic are
//! serialized behind a per-topic lock for the full load-mutate-store
//! sequence, while reads run lock-free against the atomically-replaced
//! containers.
//!
//! # Example
//!
//! ```ignore
//! use bus::{Config, MessageBus, SendMessage};
//!
//! let bus = MessageBus::open(Config::default()).await?;
//! let receipt = bus
//!     .send_message(SendMessage {
//!         handle: Some("planner".to_string()),
//!         body: Some("phase 1 complete".to_string()),
//!         signature: None,
//!         topic: Some("status".to_string()),
//!     })
//!     .await?;
//! println!("appended at index {}", receipt.index);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use common::clock::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::log::TopicLog;
use crate::model::{Entry, Index, Receipt, TimestampMs, TopicLength, TopicListing};
use crate::storage::TopicStore;
use crate::topic::TopicName;

/// Request to append one message.
///
/// All fields are optional at this boundary so the facade, not the
/// adapter, decides what is required: `body` must be present, `handle`
/// and `signature` default to empty, `topic` defaults to the configured
/// default topic.
#[derive(Debug, Clone, Default)]
pub struct SendMessage {
    pub handle: Option<String>,
    pub body: Option<String>,
    pub signature: Option<String>,
    pub topic: Option<String>,
}

/// Request to read the suffix of a topic starting at an index.
#[derive(Debug, Clone)]
pub struct ReadFrom {
    pub start_index: Index,
    pub topic: Option<String>,
}

/// Request to read all messages at or after a timestamp.
#[derive(Debug, Clone)]
pub struct ReadSince {
    pub since_ms: TimestampMs,
    pub topic: Option<String>,
}

/// The message bus store facade.
///
/// All methods take `&self`; the bus is designed to be shared behind an
/// [`Arc`] across concurrent callers. No topic contents are cached
/// between operations — every read reflects the latest durably-stored
/// state at call time.
pub struct MessageBus {
    store: TopicStore,
    clock: Arc<dyn Clock>,
    default_topic: TopicName,
    /// One append lock per topic, created lazily. The outer lock guards
    /// only the registry lookup, never I/O.
    append_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MessageBus {
    /// Opens a bus over the configured storage root, using the system clock.
    pub async fn open(config: Config) -> Result<Self> {
        Self::open_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Opens a bus with an injected clock.
    ///
    /// Timestamps on appended messages come from `clock`; tests use this
    /// with a mock clock to make timestamp-range reads deterministic.
    pub async fn open_with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let default_topic = TopicName::parse(&config.default_topic)?;
        let store = TopicStore::open(&config.data_dir).await?;
        Ok(Self {
            store,
            clock,
            default_topic,
            append_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Appends a message to a topic, creating the topic on first append.
    ///
    /// Returns the assigned index and timestamp. Not idempotent:
    /// re-sending the same logical message appends a new record.
    pub async fn send_message(&self, request: SendMessage) -> Result<Receipt> {
        let body = request
            .body
            .ok_or_else(|| Error::Validation("'body' is required".to_string()))?;
        let topic = self.resolve_topic(request.topic)?;

        let lock = self.append_lock(&topic).await;
        let _guard = lock.lock().await;

        let log = TopicLog::new(&topic, &self.store, &self.clock);
        let (index, timestamp) = log
            .append(
                request.handle.unwrap_or_default(),
                body,
                request.signature.unwrap_or_default(),
            )
            .await?;

        tracing::debug!(topic = %topic, index, timestamp, "message appended");
        Ok(Receipt {
            topic: topic.as_str().to_string(),
            index,
            timestamp,
        })
    }

    /// Reads the contiguous suffix of a topic with index >= `start_index`.
    pub async fn read_from(&self, request: ReadFrom) -> Result<Vec<Entry>> {
        let topic = self.resolve_topic(request.topic)?;
        let log = TopicLog::new(&topic, &self.store, &self.clock);
        log.read_from(request.start_index).await
    }

    /// Reads all messages of a topic with timestamp >= `since_ms`.
    pub async fn read_since(&self, request: ReadSince) -> Result<Vec<Entry>> {
        let topic = self.resolve_topic(request.topic)?;
        let log = TopicLog::new(&topic, &self.store, &self.clock);
        log.read_since(request.since_ms).await
    }

    /// Number of messages persisted for a topic.
    pub async fn topic_length(&self, topic: Option<String>) -> Result<TopicLength> {
        let topic = self.resolve_topic(topic)?;
        let log = TopicLog::new(&topic, &self.store, &self.clock);
        let length = log.len().await?;
        Ok(TopicLength {
            topic: topic.as_str().to_string(),
            length,
        })
    }

    /// Lists topics that have received at least one successful append.
    pub async fn topics(&self) -> Result<TopicListing> {
        let topics = self.store.list().await?;
        let count = topics.len();
        Ok(TopicListing { topics, count })
    }

    fn resolve_topic(&self, topic: Option<String>) -> Result<TopicName> {
        match topic {
            Some(name) => TopicName::parse(&name),
            None => Ok(self.default_topic.clone()),
        }
    }

    /// Fetches or creates the append lock for a topic.
    async fn append_lock(&self, topic: &TopicName) -> Arc<Mutex<()>> {
        let mut locks = self.append_locks.lock().await;
        locks
            .entry(topic.as_str().to_string())
            .or_default()
            .clone()
    }
}
