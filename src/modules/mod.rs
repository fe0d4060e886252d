pub mod homework;
pub mod metrics;
