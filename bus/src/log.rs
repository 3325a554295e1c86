//! Per-topic append-only log operations.
//!
//! [`TopicLog`] enforces append-only semantics and serves range queries
//! for one topic on top of the store's whole-container load/store. It
//! holds no state of its own between operations — every call re-reads the
//! durable container, so durable storage is the sole source of truth.

use std::sync::Arc;

use common::clock::Clock;

use crate::error::{Error, Result};
use crate::model::{Entry, Index, Message, TimestampMs};
use crate::storage::TopicStore;
use crate::topic::TopicName;

/// Append and range-read operations for a single topic.
pub(crate) struct TopicLog<'a> {
    name: &'a TopicName,
    store: &'a TopicStore,
    clock: &'a Arc<dyn Clock>,
}

impl<'a> TopicLog<'a> {
    pub(crate) fn new(
        name: &'a TopicName,
        store: &'a TopicStore,
        clock: &'a Arc<dyn Clock>,
    ) -> Self {
        Self { name, store, clock }
    }

    /// Appends a message, assigning its index and timestamp.
    ///
    /// The caller must hold the topic's append lock for the duration of
    /// this call: append is a load-mutate-store sequence, and two
    /// unserialized appends would compute the same index and lose one
    /// record.
    pub(crate) async fn append(
        &self,
        handle: String,
        body: String,
        signature: String,
    ) -> Result<(Index, TimestampMs)> {
        // Absence is normalized to empty here, and only here, to support
        // the first-ever append to a topic.
        let mut messages = self.store.load(self.name).await?.unwrap_or_default();

        let index = messages.len() as Index;
        let timestamp = self.clock.now_millis();
        messages.push(Message {
            handle,
            body,
            signature,
            timestamp,
        });

        self.store.store(self.name, &messages).await?;
        Ok((index, timestamp))
    }

    /// Returns the contiguous suffix of messages with index >= `start`.
    pub(crate) async fn read_from(&self, start: Index) -> Result<Vec<Entry>> {
        let messages = self.load_existing().await?;
        let len = messages.len() as Index;
        if start >= len {
            return Err(Error::IndexOutOfRange {
                topic: self.name.as_str().to_string(),
                requested: start,
                len,
            });
        }
        Ok(entries(messages)
            .filter(|e| e.index >= start)
            .collect())
    }

    /// Returns all messages with `timestamp >= since`, in index order.
    ///
    /// A linear filter rather than a binary search: timestamps are not
    /// strictly increasing, so no index corresponds to a timestamp
    /// boundary. An empty result is valid for an existing topic.
    pub(crate) async fn read_since(&self, since: TimestampMs) -> Result<Vec<Entry>> {
        let messages = self.load_existing().await?;
        Ok(entries(messages)
            .filter(|e| e.message.timestamp >= since)
            .collect())
    }

    /// Number of messages currently persisted for this topic.
    pub(crate) async fn len(&self) -> Result<u64> {
        Ok(self.load_existing().await?.len() as u64)
    }

    async fn load_existing(&self) -> Result<Vec<Message>> {
        self.store
            .load(self.name)
            .await?
            .ok_or_else(|| Error::TopicNotFound(self.name.as_str().to_string()))
    }
}

/// Pairs each message with its position-derived index.
fn entries(messages: Vec<Message>) -> impl Iterator<Item = Entry> {
    messages
        .into_iter()
        .enumerate()
        .map(|(i, message)| Entry {
            index: i as Index,
            message,
        })
}
