pub mod catalog;
pub mod parser;
pub mod validator;

pub use catalog::*;
pub use parser::*;
pub use validator::*;
