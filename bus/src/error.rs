//! Error types for bus operations.
//!
//! Every failure a caller can observe maps onto one of these variants.
//! The facade never panics on a bad request: validation failures, reads
//! against unknown topics, and storage faults are all reported as values.

use thiserror::Error;

use crate::model::Index;

/// Errors returned by the message bus.
#[derive(Debug, Error)]
pub enum Error {
    /// A send request is missing a required field.
    ///
    /// Nothing is persisted when validation fails.
    #[error("validation error: {0}")]
    Validation(String),

    /// A read-family operation targeted a topic with no persisted container.
    #[error("topic '{0}' not found")]
    TopicNotFound(String),

    /// `read_from` start index outside the topic's valid range.
    ///
    /// The message carries the valid range so callers can retry.
    #[error("start index {requested} out of range for topic '{topic}' (valid range: 0..{len})")]
    IndexOutOfRange {
        topic: String,
        requested: Index,
        len: Index,
    },

    /// Topic name unsafe to use as a storage container identifier.
    #[error("invalid topic name '{name}': {reason}")]
    InvalidTopicName { name: String, reason: String },

    /// Underlying durable-storage failure (I/O or corrupt container).
    ///
    /// The previous durable state remains intact.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(format!("corrupt topic container: {err}"))
    }
}

/// Result type alias for bus operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_include_valid_range_in_out_of_range_message() {
        // given
        let err = Error::IndexOutOfRange {
            topic: "general".to_string(),
            requested: 7,
            len: 3,
        };

        // when
        let text = err.to_string();

        // then
        assert!(text.contains("7"));
        assert!(text.contains("0..3"));
        assert!(text.contains("general"));
    }

    #[test]
    fn should_convert_io_error_to_storage() {
        // given
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

        // when
        let err: Error = io.into();

        // then
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("denied"));
    }
}
