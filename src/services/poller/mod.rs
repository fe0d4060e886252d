pub mod cursor;
pub mod engine;
pub mod error;

pub use cursor::CursorPolicy;
pub use engine::{CycleOutcome, PollLoop, PollSettings, DEFAULT_RETRY_PERIOD};
pub use error::{failure_message, PollError};
