pub mod notifier;
pub mod telegram;

pub use notifier::*;
pub use telegram::*;
