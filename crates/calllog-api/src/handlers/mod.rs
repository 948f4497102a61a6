//! HTTP request handlers

pub mod call_log;

pub use call_log::configure as configure_call_logs;
