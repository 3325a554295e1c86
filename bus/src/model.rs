//! Core data types for the message bus.
//!
//! This module defines the persisted message schema and the read-side
//! views returned by bus operations.

use serde::{Deserialize, Serialize};

/// Zero-based position of a message within its topic.
///
/// Indices are assigned at append time as the topic's current length, so
/// within one topic they form a contiguous range `0..length` with no gaps.
/// The index is the ordering authority; timestamps may repeat.
pub type Index = u64;

/// Milliseconds since the Unix epoch.
pub type TimestampMs = i64;

/// One persisted message.
///
/// This is the unit stored in a topic's container. Field names follow the
/// on-disk schema exactly (`body` persists as `message-body`); the
/// server-assigned `timestamp` must round-trip unchanged. The message's
/// index is not a stored field — it is derived from position in the
/// container.
///
/// # Example
///
/// ```
/// use bus::Message;
///
/// let msg = Message {
///     handle: "researcher".to_string(),
///     body: "experiment 12 finished".to_string(),
///     signature: "— r".to_string(),
///     timestamp: 1_700_000_000_000,
/// };
/// assert!(serde_json::to_string(&msg).unwrap().contains("message-body"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Free-form sender identifier; may be empty.
    #[serde(default)]
    pub handle: String,

    /// The message payload.
    #[serde(rename = "message-body")]
    pub body: String,

    /// Free-form decorative sign-off; may be empty.
    #[serde(default)]
    pub signature: String,

    /// Milliseconds since epoch, assigned by the store — never by the caller.
    pub timestamp: TimestampMs,
}

/// A message read back from a topic, paired with its derived index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Zero-based position within the topic.
    pub index: Index,
    /// The persisted message.
    pub message: Message,
}

/// Result of a successful append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The topic the message was appended to (after default substitution).
    pub topic: String,
    /// Index assigned to the new message.
    pub index: Index,
    /// Timestamp assigned to the new message.
    pub timestamp: TimestampMs,
}

/// Result of a topic length query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicLength {
    pub topic: String,
    pub length: u64,
}

/// Result of a topic listing.
///
/// Topics appear here iff at least one append to them has durably
/// completed. Names are sorted ascending so repeated calls against
/// unchanged storage return identical listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicListing {
    pub topics: Vec<String>,
    pub count: usize,
}
