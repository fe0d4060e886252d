use std::sync::Arc;

use super::MetricsRegistry;
use crate::modules::homework::PollCursor;

/// Collector for poll loop metrics
#[derive(Clone)]
pub struct PollMetricsCollector {
    metrics: Arc<MetricsRegistry>,
}

impl PollMetricsCollector {
    pub fn new(metrics: Arc<MetricsRegistry>) -> Self {
        Self { metrics }
    }

    pub fn record_cycle(&self, outcome: &str) {
        self.metrics
            .poll_cycles_total
            .with_label_values(&[outcome])
            .inc();
    }

    pub fn record_failure(&self, kind: &str) {
        self.metrics
            .poll_failures_total
            .with_label_values(&[kind])
            .inc();
    }

    pub fn record_notification(&self) {
        self.metrics.notifications_sent_total.inc();
    }

    pub fn record_suppressed(&self) {
        self.metrics.log_messages_suppressed_total.inc();
    }

    pub fn set_cursor(&self, cursor: PollCursor) {
        self.metrics.poll_cursor_timestamp.set(cursor.timestamp() as f64);
    }
}
