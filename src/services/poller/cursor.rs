use std::str::FromStr;

use crate::modules::homework::PollCursor;

/// How the `from_date` cursor moves after a successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPolicy {
    /// Move to the server clock (or the local fetch start time), never back.
    #[default]
    Advance,
    /// Keep the start cursor forever; the fetch window only grows.
    Fixed,
}

impl CursorPolicy {
    pub fn next(
        &self,
        current: PollCursor,
        server_date: Option<i64>,
        fetch_started_at: PollCursor,
    ) -> PollCursor {
        match self {
            Self::Fixed => current,
            Self::Advance => {
                let target = server_date
                    .map(PollCursor::from_timestamp)
                    .unwrap_or(fetch_started_at);
                current.advanced_to(target)
            }
        }
    }
}

impl FromStr for CursorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advance" => Ok(Self::Advance),
            "fixed" => Ok(Self::Fixed),
            other => Err(format!("expected 'advance' or 'fixed', got '{}'", other)),
        }
    }
}
