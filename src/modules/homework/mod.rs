pub mod model;
pub mod schema;

pub use model::{HomeworkStatus, PollCursor, Submission};
pub use schema::StatusesQuery;
