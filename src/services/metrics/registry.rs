use prometheus::{
    Registry, Counter, CounterVec, Gauge, Opts,
    Encoder, TextEncoder,
};
use std::sync::Arc;

/// Central metrics registry for the notifier
pub struct MetricsRegistry {
    registry: Registry,

    // Poll loop
    pub poll_cycles_total: CounterVec,
    pub poll_failures_total: CounterVec,
    pub poll_cursor_timestamp: Gauge,

    // Delivery
    pub notifications_sent_total: Counter,
    pub log_messages_suppressed_total: Counter,
}

impl MetricsRegistry {
    pub fn new() -> Result<Arc<Self>, prometheus::Error> {
        let registry = Registry::new();

        let poll_cycles_total = CounterVec::new(
            Opts::new("poll_cycles_total", "Completed poll cycles by outcome")
                .namespace("homework"),
            &["outcome"],
        )?;
        registry.register(Box::new(poll_cycles_total.clone()))?;

        let poll_failures_total = CounterVec::new(
            Opts::new("poll_failures_total", "Failures caught by the poll loop")
                .namespace("homework"),
            &["kind"],
        )?;
        registry.register(Box::new(poll_failures_total.clone()))?;

        let poll_cursor_timestamp = Gauge::with_opts(
            Opts::new("poll_cursor_timestamp", "Current from_date cursor (unix seconds)")
                .namespace("homework"),
        )?;
        registry.register(Box::new(poll_cursor_timestamp.clone()))?;

        let notifications_sent_total = Counter::with_opts(
            Opts::new("notifications_sent_total", "Status notifications delivered")
                .namespace("homework"),
        )?;
        registry.register(Box::new(notifications_sent_total.clone()))?;

        let log_messages_suppressed_total = Counter::with_opts(
            Opts::new("log_messages_suppressed_total", "Failure messages dropped as repeated or muted")
                .namespace("homework"),
        )?;
        registry.register(Box::new(log_messages_suppressed_total.clone()))?;

        Ok(Arc::new(Self {
            registry,
            poll_cycles_total,
            poll_failures_total,
            poll_cursor_timestamp,
            notifications_sent_total,
            log_messages_suppressed_total,
        }))
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String, Box<dyn std::error::Error>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
