use serde::Serialize;

use crate::foundation::core::{Point, Rect, Rgb};
use crate::foundation::error::LifegridResult;

/// Measured extents of a single text run under the current font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Extents {
    /// Advance width in points.
    pub width: f64,
    /// Line height in points.
    pub height: f64,
}

/// Font weight subset the calendar uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font slant subset the calendar uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

/// Full font selection state: family, weight, slant, and size.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FontSpec {
    /// Family name as known to the measuring backend.
    pub family: String,
    /// Weight.
    pub weight: FontWeight,
    /// Slant.
    pub slant: FontSlant,
    /// Size in points.
    pub size: f64,
}

impl FontSpec {
    /// Upright regular face of `family` at `size`.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
            size,
        }
    }

    /// Switch to the bold weight.
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    /// Switch to the italic slant.
    pub fn italic(mut self) -> Self {
        self.slant = FontSlant::Italic;
        self
    }
}

/// Text measurement capability.
///
/// Stateful like a graphics context: [`set_font`](Self::set_font)
/// establishes the face and size every following
/// [`measure_text`](Self::measure_text) call uses. Measurement is
/// infallible; backends without a usable face substitute approximate
/// metrics rather than failing.
pub trait TextMetrics {
    /// Select the font used by subsequent measurements.
    fn set_font(&mut self, font: &FontSpec);

    /// Measure `text` as a single run under the current font.
    fn measure_text(&mut self, text: &str) -> Extents;
}

/// Drawing surface capability: measurement plus primitive emission.
///
/// One surface handle owns one page for its open, draw, seal lifetime.
/// Rotation state applies to subsequently drawn text runs, each rotated
/// about its own origin, and composes with previous rotations the way a
/// graphics context transform does.
pub trait Surface: TextMetrics {
    /// Draw a rectangle filled with `fill` and stroked with `stroke`.
    ///
    /// The border is omitted when `stroke_width <= 0`.
    fn draw_rect(&mut self, rect: Rect, stroke: Rgb, fill: Rgb, stroke_width: f64)
    -> LifegridResult<()>;

    /// Draw `text` with its baseline starting at `origin`, in the current
    /// font, colour, and rotation.
    fn draw_text(&mut self, origin: Point, text: &str) -> LifegridResult<()>;

    /// Select the colour for following text runs.
    fn set_color(&mut self, color: Rgb);

    /// Add `radians` to the current text rotation.
    fn rotate(&mut self, radians: f64);

    /// Seal the page; no further drawing is accepted.
    fn finish_page(&mut self) -> LifegridResult<()>;
}

/// One recorded surface operation.
///
/// The composer emits these in paint order and never references an op
/// from another, so a sequence can be streamed, replayed, or dumped as
/// JSON without backtracking.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Stroked, filled rectangle.
    Rect {
        /// Placement on the page, in points.
        rect: Rect,
        /// Border colour.
        stroke: Rgb,
        /// Interior colour.
        fill: Rgb,
        /// Border width in points; no border when `<= 0`.
        stroke_width: f64,
    },
    /// Select the font for following text ops.
    SetFont {
        /// Full font selection.
        font: FontSpec,
    },
    /// Select the colour for following text ops.
    SetColor {
        /// Straight RGB colour.
        color: Rgb,
    },
    /// Add to the rotation applied to following text ops.
    Rotate {
        /// Angle increment in radians.
        radians: f64,
    },
    /// Text run starting at a baseline origin.
    Text {
        /// Baseline start point.
        origin: Point,
        /// UTF-8 content.
        text: String,
    },
    /// Seal the page.
    FinishPage,
}

/// Replay recorded ops onto a live surface, in order.
pub fn replay(ops: &[DrawOp], surface: &mut dyn Surface) -> LifegridResult<()> {
    for op in ops {
        match op {
            DrawOp::Rect {
                rect,
                stroke,
                fill,
                stroke_width,
            } => surface.draw_rect(*rect, *stroke, *fill, *stroke_width)?,
            DrawOp::SetFont { font } => surface.set_font(font),
            DrawOp::SetColor { color } => surface.set_color(*color),
            DrawOp::Rotate { radians } => surface.rotate(*radians),
            DrawOp::Text { origin, text } => surface.draw_text(*origin, text)?,
            DrawOp::FinishPage => surface.finish_page()?,
        }
    }
    Ok(())
}
