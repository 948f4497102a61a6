//! Data Transfer Objects (DTOs) for API requests and responses

pub mod call_log;
pub mod common;

pub use call_log::*;
pub use common::*;
