//! HTTP request types for the bus server.

use serde::Deserialize;

use crate::bus::{ReadFrom, ReadSince, SendMessage};
use crate::model::{Index, TimestampMs};

/// JSON body for POST /api/v1/bus/send.
///
/// All fields optional at the wire level; the facade enforces that `body`
/// is present and reports a validation error otherwise.
#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    pub handle: Option<String>,
    pub body: Option<String>,
    pub signature: Option<String>,
    pub topic: Option<String>,
}

impl From<SendMessageBody> for SendMessage {
    fn from(body: SendMessageBody) -> Self {
        SendMessage {
            handle: body.handle,
            body: body.body,
            signature: body.signature,
            topic: body.topic,
        }
    }
}

/// Query parameters for GET /api/v1/bus/read_from.
///
/// `start_index` deserializes as unsigned, so negative values are
/// rejected at the boundary before reaching the store.
#[derive(Debug, Deserialize)]
pub struct ReadFromParams {
    pub start_index: Index,
    pub topic: Option<String>,
}

impl From<ReadFromParams> for ReadFrom {
    fn from(params: ReadFromParams) -> Self {
        ReadFrom {
            start_index: params.start_index,
            topic: params.topic,
        }
    }
}

/// Query parameters for GET /api/v1/bus/read_since.
#[derive(Debug, Deserialize)]
pub struct ReadSinceParams {
    pub since_ms: TimestampMs,
    pub topic: Option<String>,
}

impl From<ReadSinceParams> for ReadSince {
    fn from(params: ReadSinceParams) -> Self {
        ReadSince {
            since_ms: params.since_ms,
            topic: params.topic,
        }
    }
}

/// Query parameters for GET /api/v1/bus/length.
#[derive(Debug, Deserialize)]
pub struct TopicParams {
    pub topic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_send_body_with_all_fields() {
        // given
        let json = r#"{"handle":"A","body":"hi","signature":"-a","topic":"t1"}"#;

        // when
        let body: SendMessageBody = serde_json::from_str(json).unwrap();
        let request = SendMessage::from(body);

        // then
        assert_eq!(request.handle.as_deref(), Some("A"));
        assert_eq!(request.body.as_deref(), Some("hi"));
        assert_eq!(request.signature.as_deref(), Some("-a"));
        assert_eq!(request.topic.as_deref(), Some("t1"));
    }

    #[test]
    fn should_parse_send_body_with_only_body() {
        // given
        let json = r#"{"body":"hi"}"#;

        // when
        let body: SendMessageBody = serde_json::from_str(json).unwrap();

        // then
        assert!(body.handle.is_none());
        assert!(body.topic.is_none());
    }

    #[test]
    fn should_reject_negative_start_index() {
        // given
        let json = r#"{"start_index":-1}"#;

        // when
        let result: Result<ReadFromParams, _> = serde_json::from_str(json);

        // then
        assert!(result.is_err());
    }

    #[test]
    fn should_accept_negative_since_timestamp() {
        // given - pre-epoch cutoffs are odd but representable
        let json = r#"{"since_ms":-5}"#;

        // when
        let params: ReadSinceParams = serde_json::from_str(json).unwrap();

        // then
        assert_eq!(params.since_ms, -5);
    }
}
