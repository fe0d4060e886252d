use crate::services::homework::{UnknownStatusError, ValidationError};
use crate::services::notify::DeliveryError;
use crate::services::practicum::FetchError;

/// Every failure a poll cycle can raise. All of them are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatusError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl PollError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Validation(_) => "validation",
            Self::UnknownStatus(_) => "unknown_status",
            Self::Delivery(_) => "delivery",
        }
    }
}

/// Text reported for a failure caught at the loop boundary.
pub fn failure_message(err: &PollError) -> String {
    let detail = match err {
        PollError::Fetch(e) => format!("homework API request failed: {}", e),
        PollError::Validation(e) => format!("unexpected homework API response: {}", e),
        PollError::UnknownStatus(e) => e.to_string(),
        PollError::Delivery(e) => e.to_string(),
    };
    format!("Operation failure: {}", detail)
}
