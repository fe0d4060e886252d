use serde::Serialize;

use super::model::PollCursor;

// Query string for GET homework_statuses
#[derive(Debug, Clone, Serialize)]
pub struct StatusesQuery {
    pub from_date: i64,
}

impl From<PollCursor> for StatusesQuery {
    fn from(cursor: PollCursor) -> Self {
        Self {
            from_date: cursor.timestamp(),
        }
    }
}
