pub mod homework;
pub mod logging;
pub mod metrics;
pub mod notify;
pub mod poller;
pub mod practicum;
