use std::sync::Arc;

use super::telegram::ChatTransport;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("empty message")]
    EmptyMessage,
    #[error("failed to deliver {text:?} via {channel} to chat {destination}: {reason}")]
    Transport {
        channel: &'static str,
        destination: String,
        text: String,
        reason: String,
    },
}

/// Delivers text to chat destinations over a [`ChatTransport`].
#[derive(Clone)]
pub struct Notifier {
    transport: Arc<dyn ChatTransport>,
}

impl Notifier {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    pub async fn notify(&self, destination: &str, text: &str) -> Result<(), DeliveryError> {
        if text.trim().is_empty() {
            return Err(DeliveryError::EmptyMessage);
        }

        self.transport
            .send_text(destination, text)
            .await
            .map_err(|e| DeliveryError::Transport {
                channel: self.transport.name(),
                destination: destination.to_string(),
                text: text.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(destination, "Bot sent message {:?}", text);
        Ok(())
    }
}
