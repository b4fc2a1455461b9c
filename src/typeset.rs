//! Measurement-driven text fitting: wrapping and justification.

pub mod fit;
