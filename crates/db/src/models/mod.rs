pub mod error_report;
pub mod project;
pub mod request_log;
pub mod response_sample;
