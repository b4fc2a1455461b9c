//! Drawing-surface contract and the shipped backends.
//!
//! [`surface`] defines the capability the composer records against;
//! [`svg`] implements it over SVG markup, measuring through the
//! [`fonts`] ruler; [`raster`] turns finished SVG into RGBA8 previews.

pub mod fonts;
pub mod raster;
pub mod surface;
pub mod svg;
