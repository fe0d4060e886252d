use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::modules::homework::{PollCursor, StatusesQuery};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("endpoint {endpoint} unreachable: {reason}")]
    Network { endpoint: String, reason: String },
    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },
    #[error("endpoint {endpoint} returned HTTP {code}")]
    Status { endpoint: String, code: u16 },
    #[error("response from {endpoint} is not JSON: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Source of raw homework status payloads.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, cursor: PollCursor) -> Result<Value, FetchError>;
}

/// Practicum homework API client
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn network_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            return FetchError::Timeout {
                endpoint: self.endpoint.clone(),
            };
        }
        // Dropping the URL keeps the text identical across cursors
        FetchError::Network {
            endpoint: self.endpoint.clone(),
            reason: err.without_url().to_string(),
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, cursor: PollCursor) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&StatusesQuery::from(cursor))
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                code = status.as_u16(),
                url = %response.url(),
                "Homework API returned an error status"
            );
            return Err(FetchError::Status {
                endpoint: self.endpoint.clone(),
                code: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                return self.network_error(e);
            }
            FetchError::Decode {
                endpoint: self.endpoint.clone(),
                reason: e.without_url().to_string(),
            }
        })
    }
}
