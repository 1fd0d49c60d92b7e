//! Tool argument schemas.
//!
//! This module provides the declarative argument-shape descriptors attached
//! to every tool, and the generic routine that validates raw call arguments
//! against them.

pub mod types;
pub mod validation;

pub use types::{ArgSpec, ArgType, ArgumentSchema};
pub use validation::Arguments;
