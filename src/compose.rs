//! Calendar styling and the document composer.

pub mod document;
pub mod style;
