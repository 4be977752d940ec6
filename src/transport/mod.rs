//! The one outbound HTTP call.

pub mod error;
pub mod loader;
