pub mod dedup;
pub mod sink;

pub use dedup::*;
pub use sink::*;
