//! HTTP response types for the bus server.

use serde::Serialize;

use crate::model::{Entry, Index, TimestampMs};

/// Response for POST /api/v1/bus/send.
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub status: String,
    pub topic: String,
    pub index: Index,
    pub timestamp: TimestampMs,
}

impl SendResponse {
    pub fn success(topic: String, index: Index, timestamp: TimestampMs) -> Self {
        Self {
            status: "success".to_string(),
            topic,
            index,
            timestamp,
        }
    }
}

/// One message in a read response.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub index: Index,
    pub handle: String,
    pub body: String,
    pub signature: String,
    pub timestamp: TimestampMs,
}

impl From<Entry> for MessageView {
    fn from(entry: Entry) -> Self {
        Self {
            index: entry.index,
            handle: entry.message.handle,
            body: entry.message.body,
            signature: entry.message.signature,
            timestamp: entry.message.timestamp,
        }
    }
}

/// Response for the read_from / read_since endpoints.
#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub status: String,
    pub messages: Vec<MessageView>,
}

impl MessagesResponse {
    pub fn success(entries: Vec<Entry>) -> Self {
        Self {
            status: "success".to_string(),
            messages: entries.into_iter().map(MessageView::from).collect(),
        }
    }
}

/// Response for GET /api/v1/bus/length.
#[derive(Debug, Serialize)]
pub struct LengthResponse {
    pub status: String,
    pub topic: String,
    pub length: u64,
}

impl LengthResponse {
    pub fn success(topic: String, length: u64) -> Self {
        Self {
            status: "success".to_string(),
            topic,
            length,
        }
    }
}

/// Response for GET /api/v1/bus/topics.
#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub status: String,
    pub topics: Vec<String>,
    pub count: usize,
}

impl TopicsResponse {
    pub fn success(topics: Vec<String>, count: usize) -> Self {
        Self {
            status: "success".to_string(),
            topics,
            count,
        }
    }
}
