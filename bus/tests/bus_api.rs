//! Integration tests for the message bus public API.

use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use common::clock::{Clock, MockClock};

use bus::{Config, Error, MessageBus, ReadFrom, ReadSince, SendMessage};

fn config_for(dir: &tempfile::TempDir) -> Config {
    Config {
        data_dir: dir.path().to_path_buf(),
        default_topic: "general".to_string(),
    }
}

fn send(handle: &str, body: &str, topic: &str) -> SendMessage {
    SendMessage {
        handle: Some(handle.to_string()),
        body: Some(body.to_string()),
        signature: Some(String::new()),
        topic: Some(topic.to_string()),
    }
}

#[tokio::test]
async fn test_send_read_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let bus = MessageBus::open(config_for(&dir)).await.unwrap();

    let first = bus.send_message(send("A", "hi", "t1")).await.unwrap();
    assert_eq!(first.topic, "t1");
    assert_eq!(first.index, 0);

    let second = bus.send_message(send("A", "hi again", "t1")).await.unwrap();
    assert_eq!(second.index, 1);
    assert!(second.timestamp >= first.timestamp);

    let length = bus.topic_length(Some("t1".to_string())).await.unwrap();
    assert_eq!(length.length, 2);

    let entries = bus
        .read_from(ReadFrom {
            start_index: 1,
            topic: Some("t1".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].index, 1);
    assert_eq!(entries[0].message.body, "hi again");
    assert_eq!(entries[0].message.handle, "A");
}

#[tokio::test]
async fn test_messages_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    // First instance writes
    {
        let bus = MessageBus::open(config_for(&dir)).await.unwrap();
        bus.send_message(send("A", "persisted", "audit")).await.unwrap();
        bus.send_message(send("B", "also persisted", "audit"))
            .await
            .unwrap();
    }

    // Second instance over the same root reads everything back
    let bus = MessageBus::open(config_for(&dir)).await.unwrap();
    let entries = bus
        .read_from(ReadFrom {
            start_index: 0,
            topic: Some("audit".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message.body, "persisted");
    assert_eq!(entries[1].message.body, "also persisted");

    // And appends continue at the right index
    let receipt = bus.send_message(send("C", "more", "audit")).await.unwrap();
    assert_eq!(receipt.index, 2);
}

#[tokio::test]
async fn test_topic_directory_reflects_appends() {
    let dir = tempfile::tempdir().unwrap();
    let bus = MessageBus::open(config_for(&dir)).await.unwrap();

    assert_eq!(bus.topics().await.unwrap().count, 0);

    bus.send_message(send("A", "x", "beta")).await.unwrap();
    bus.send_message(send("A", "x", "alpha")).await.unwrap();

    // A request that fails validation leaves no trace
    let failed = bus
        .send_message(SendMessage {
            topic: Some("never".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(failed, Err(Error::Validation(_))));

    let listing = bus.topics().await.unwrap();
    assert_eq!(listing.topics, vec!["alpha", "beta"]);
    assert_eq!(listing.count, 2);
}

#[tokio::test]
async fn test_read_from_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    let bus = MessageBus::open(config_for(&dir)).await.unwrap();

    // Absent topic
    let missing = bus
        .read_from(ReadFrom {
            start_index: 0,
            topic: Some("t".to_string()),
        })
        .await;
    assert!(matches!(missing, Err(Error::TopicNotFound(_))));

    bus.send_message(send("A", "only", "t")).await.unwrap();

    // start_index == length is out of range, message names the valid range
    let out_of_range = bus
        .read_from(ReadFrom {
            start_index: 1,
            topic: Some("t".to_string()),
        })
        .await;
    match out_of_range {
        Err(err @ Error::IndexOutOfRange { .. }) => {
            assert!(err.to_string().contains("0..1"));
        }
        other => panic!("expected IndexOutOfRange, got {other:?}"),
    }

    // start_index == length - 1 returns exactly the last record
    let last = bus
        .read_from(ReadFrom {
            start_index: 0,
            topic: Some("t".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].message.body, "only");
}

#[tokio::test]
async fn test_read_since_with_controlled_clock() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(MockClock::with_time(
        UNIX_EPOCH + Duration::from_millis(10_000),
    ));
    let clock_dyn: Arc<dyn Clock> = clock.clone();
    let bus = MessageBus::open_with_clock(config_for(&dir), clock_dyn)
        .await
        .unwrap();

    bus.send_message(send("A", "at-10000", "t")).await.unwrap();
    clock.advance(Duration::from_millis(500));
    bus.send_message(send("A", "at-10500", "t")).await.unwrap();
    bus.send_message(send("A", "also-10500", "t")).await.unwrap();

    // Inclusive cutoff keeps both same-millisecond records in order
    let entries = bus
        .read_since(ReadSince {
            since_ms: 10_500,
            topic: Some("t".to_string()),
        })
        .await
        .unwrap();
    let bodies: Vec<_> = entries.iter().map(|e| e.message.body.as_str()).collect();
    assert_eq!(bodies, vec!["at-10500", "also-10500"]);

    // Future cutoff: empty result for an existing topic, not TopicNotFound
    let future = bus
        .read_since(ReadSince {
            since_ms: 99_999,
            topic: Some("t".to_string()),
        })
        .await
        .unwrap();
    assert!(future.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_appends_across_topics() {
    let dir = tempfile::tempdir().unwrap();
    let bus = Arc::new(MessageBus::open(config_for(&dir)).await.unwrap());

    // Interleave writers on two topics; each topic must stay contiguous
    let mut handles = Vec::new();
    for i in 0..10 {
        for topic in ["left", "right"] {
            let bus = bus.clone();
            handles.push(tokio::spawn(async move {
                bus.send_message(send("w", &format!("m{i}"), topic))
                    .await
                    .unwrap();
            }));
        }
    }
    for handle in handles {
        handle.await.unwrap();
    }

    for topic in ["left", "right"] {
        let entries = bus
            .read_from(ReadFrom {
                start_index: 0,
                topic: Some(topic.to_string()),
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 10, "lost update on topic {topic}");
        for (pos, entry) in entries.iter().enumerate() {
            assert_eq!(entry.index, pos as u64);
        }
    }
}

#[tokio::test]
async fn test_topic_name_hardening() {
    let dir = tempfile::tempdir().unwrap();
    let bus = MessageBus::open(config_for(&dir)).await.unwrap();

    for topic in ["../outside", "a/b", "..", ".hidden"] {
        let result = bus.send_message(send("A", "x", topic)).await;
        assert!(
            matches!(result, Err(Error::InvalidTopicName { .. })),
            "accepted unsafe topic {topic:?}"
        );
    }

    // Nothing escaped the storage root
    assert_eq!(bus.topics().await.unwrap().count, 0);
    let outside = dir.path().parent().unwrap().join("outside.json");
    assert!(!outside.exists());
}
