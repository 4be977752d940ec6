//! Turning a response body into long and wide tables.

pub mod error;
pub mod parser;
pub mod pivot;
pub mod timezone;
