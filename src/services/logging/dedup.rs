use super::sink::{LogSink, Severity};

pub const DEFAULT_MUTED_SUBSTRING: &str = "telegram";

/// Drops repeated and muted messages before they reach the sinks.
///
/// A message is muted when it contains the configured substring, compared
/// case-insensitively. The mute check runs before the repeat check and does
/// not touch the remembered message, so a delivery failure reported through
/// the chat sink can never trigger another chat delivery.
pub struct DeduplicatingLogger {
    last_message: Option<String>,
    muted_substring: Option<String>,
    sinks: Vec<Box<dyn LogSink>>,
}

impl DeduplicatingLogger {
    pub fn new(muted_substring: Option<&str>) -> Self {
        Self {
            last_message: None,
            muted_substring: muted_substring
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn is_muted(&self, message: &str) -> bool {
        self.muted_substring
            .as_deref()
            .is_some_and(|muted| message.to_lowercase().contains(muted))
    }

    /// Returns `true` when `message` should be emitted.
    pub fn offer(&mut self, message: &str) -> bool {
        if self.is_muted(message) {
            return false;
        }
        if self.last_message.as_deref() == Some(message) {
            return false;
        }
        self.last_message = Some(message.to_string());
        true
    }

    /// Offers `message` and emits it to every sink when accepted.
    pub async fn report(&mut self, message: &str, severity: Severity) -> bool {
        if self.is_muted(message) {
            tracing::warn!("Not forwarding muted message: {}", message);
            return false;
        }
        if !self.offer(message) {
            tracing::debug!("Suppressed repeated message: {}", message);
            return false;
        }

        for sink in &self.sinks {
            if let Err(e) = sink.emit(message, severity).await {
                tracing::warn!(error = %e, "Log sink failed to emit message");
            }
        }
        true
    }
}

impl Default for DeduplicatingLogger {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MUTED_SUBSTRING))
    }
}
