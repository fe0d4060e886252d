use async_trait::async_trait;
use std::fmt;

use crate::services::notify::{DeliveryError, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for messages accepted by the deduplicating logger.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn emit(&self, message: &str, severity: Severity) -> Result<(), DeliveryError>;
}

/// Writes to the process log through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

#[async_trait]
impl LogSink for ConsoleSink {
    async fn emit(&self, message: &str, severity: Severity) -> Result<(), DeliveryError> {
        match severity {
            Severity::Debug => tracing::debug!("{}", message),
            Severity::Info => tracing::info!("{}", message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
            Severity::Critical => tracing::error!(critical = true, "{}", message),
        }
        Ok(())
    }
}

/// Forwards messages at or above `min_severity` to an operations chat.
#[derive(Clone)]
pub struct ChatSink {
    notifier: Notifier,
    destination: String,
    min_severity: Severity,
}

impl ChatSink {
    pub fn new(notifier: Notifier, destination: impl Into<String>) -> Self {
        Self {
            notifier,
            destination: destination.into(),
            min_severity: Severity::Error,
        }
    }

    pub fn with_min_severity(mut self, min_severity: Severity) -> Self {
        self.min_severity = min_severity;
        self
    }
}

#[async_trait]
impl LogSink for ChatSink {
    async fn emit(&self, message: &str, severity: Severity) -> Result<(), DeliveryError> {
        if severity < self.min_severity {
            return Ok(());
        }
        self.notifier.notify(&self.destination, message).await
    }
}
