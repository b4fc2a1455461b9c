//! Shared geometry, colour, and error types.

pub mod core;
pub mod error;
