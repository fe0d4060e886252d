use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// SUBMISSION
// =============================================================================

/// Most recent homework record returned by the review API.
///
/// `metadata` keeps every field besides `name` and `status` so that two
/// submissions compare equal only when the API returned identical records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub status: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Submission {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

// =============================================================================
// STATUS
// =============================================================================

/// Review states the API is documented to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == code)
    }
}

// =============================================================================
// CURSOR
// =============================================================================

/// Unix timestamp (seconds) passed to the API as `from_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn from_timestamp(secs: i64) -> Self {
        Self(secs)
    }

    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn timestamp(&self) -> i64 {
        self.0
    }

    /// Moves forward to `other`, never backwards.
    pub fn advanced_to(self, other: PollCursor) -> Self {
        self.max(other)
    }
}

impl fmt::Display for PollCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
