//! Lifegrid composes printable weeks-of-life calendar posters.
//!
//! The pipeline is small and deterministic:
//!
//! - Parse and anchor dates ([`parse_date`], [`align_week_start`])
//! - Build the 52-column grid of week cells ([`build_rows`])
//! - Compose a [`CalendarSpec`] under a [`Style`] into an ordered [`DrawOp`]
//!   sequence ([`compose`])
//! - Replay the sequence onto a [`Surface`] such as [`SvgSurface`], then
//!   optionally rasterize the result ([`rasterize_svg`])

#![forbid(unsafe_code)]

mod calendar;
mod compose;
mod foundation;
mod render;
mod typeset;

pub use crate::calendar::date::{
    WeekStart, align_week_start, parse_date, week_contains, weeks_after,
};
pub use crate::calendar::grid::{
    Cell, CellClass, WEEK_COLUMNS, build_rows, cell_box_size, grid_x_margin,
};
pub use crate::compose::document::{CalendarSpec, MAX_AGE_ROWS, MIN_AGE_ROWS, compose, validate};
pub use crate::compose::style::{Epigraph, FontSet, LegendLabels, Palette, Style, TitleMode};
pub use crate::foundation::core::{PageMargins, PageSize, Point, Rect, Rgb};
pub use crate::foundation::error::{LifegridError, LifegridResult};
pub use crate::render::fonts::TextRuler;
pub use crate::render::raster::{RasterFrame, rasterize_svg};
pub use crate::render::surface::{
    DrawOp, Extents, FontSlant, FontSpec, FontWeight, Surface, TextMetrics, replay,
};
pub use crate::render::svg::SvgSurface;
pub use crate::typeset::fit::{TextBlock, justify, wrap};
