//! Domain models for the call log bridge

pub mod call;
pub mod filter;

pub use call::{columns, CallCategory, LogRecord, RawCallRow};
pub use filter::{LogFilter, NumberFilter};
