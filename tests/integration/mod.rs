//! Integration tests for tool dispatch.

pub mod documents;
pub mod indices;
#[cfg(feature = "mcp")]
pub mod protocol;
