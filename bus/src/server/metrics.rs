//! Prometheus metrics for the bus server.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::registry::Registry;

/// Container for all Prometheus metrics.
pub struct Metrics {
    registry: Registry,

    /// Counter of messages successfully appended.
    pub messages_appended_total: Counter,

    /// Counter of messages returned by read operations.
    pub messages_read_total: Counter,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics registry with all metrics registered.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let messages_appended_total = Counter::default();
        registry.register(
            "bus_messages_appended_total",
            "Total number of messages appended to topics",
            messages_appended_total.clone(),
        );

        let messages_read_total = Counter::default();
        registry.register(
            "bus_messages_read_total",
            "Total number of messages returned by read operations",
            messages_read_total.clone(),
        );

        Self {
            registry,
            messages_appended_total,
            messages_read_total,
        }
    }

    /// Encode all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        encode(&mut buffer, &self.registry).expect("encoding metrics to string cannot fail");
        buffer
    }
}
