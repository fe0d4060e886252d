use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Failure reported by a chat transport, reduced to its message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Anything able to post plain text into a chat.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Human-readable channel name used in error messages.
    fn name(&self) -> &'static str;

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), TransportError>;
}

/// Telegram Bot API client (`sendMessage` only)
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(api_url: &str, bot_token: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    fn name(&self) -> &'static str {
        "Telegram"
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), TransportError> {
        let url = format!("{}/sendMessage", self.base_url);

        // The request URL embeds the bot token, so it never reaches error text
        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| TransportError(format!("Bot API request failed: {}", e.without_url())))?;

        let status = response.status();
        let body: Option<BotApiResponse> = response.json().await.ok();

        match body {
            Some(body) if status.is_success() && body.ok => Ok(()),
            Some(body) => Err(TransportError(format!(
                "Bot API returned HTTP {}: {}",
                status.as_u16(),
                body.description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(TransportError(format!(
                "Bot API returned HTTP {} with an unreadable body",
                status.as_u16()
            ))),
        }
    }
}
