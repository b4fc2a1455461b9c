use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::calendar::date::WeekStart;
use crate::foundation::core::{PageMargins, PageSize, Rgb};
use crate::foundation::error::{LifegridError, LifegridResult};

/// Arrangement of the title block above the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleMode {
    /// Masthead caption over a bold title, then the epigraph block.
    Masthead,
    /// Centered title with an optional subtitle and nothing else.
    Plain,
}

/// Font face and the sizes used across the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSet {
    /// Family name passed to the measuring backend and the SVG output.
    pub face: String,
    /// Title size in points.
    pub title_size: f64,
    /// Body and caption size in points.
    pub label_size: f64,
    /// Column-index, row-label, and legend size in points.
    pub tiny_size: f64,
}

/// Colours for the page, the grid fills, and the text roles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Page background.
    pub background: Rgb,
    /// Default week box fill.
    pub cell_base: Rgb,
    /// Birthday week fill and legend swatch.
    pub birthday: Rgb,
    /// New-year week fill and legend swatch.
    pub new_year: Rgb,
    /// Week box border.
    pub border: Rgb,
    /// Primary text.
    pub text: Rgb,
    /// Masthead caption.
    pub masthead: Rgb,
    /// Epigraph body.
    pub epigraph: Rgb,
    /// Epigraph attribution.
    pub attribution: Rgb,
    /// Subtitle and sidebar captions.
    pub faint: Rgb,
}

/// Quote block rendered under the title in [`TitleMode::Masthead`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Epigraph {
    /// Body text; wrapped and justified into the epigraph column.
    pub text: String,
    /// Attribution line centered under the body.
    pub attribution: String,
}

/// Labels next to the two legend swatches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendLabels {
    /// Label for the birthday swatch.
    pub birthday: String,
    /// Label for the new-year swatch.
    pub new_year: String,
}

/// Immutable page styling: geometry, palette, typography, and the knobs
/// that differentiate the built-in presets.
///
/// A style is plain data. Loading one performs no layout; every value is
/// consulted only while composing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Page dimensions.
    pub page: PageSize,
    /// Vertical margins and box spacing.
    pub margins: PageMargins,
    /// Weekday every grid row starts on.
    pub anchor: WeekStart,
    /// Font face and sizes.
    pub fonts: FontSet,
    /// Colour assignments.
    pub palette: Palette,
    /// Per-channel shift applied to darkened week fills, clamped into
    /// `0.0..=1.0` per channel.
    pub darken_delta: f64,
    /// Fraction of the column width above which an epigraph line is
    /// stretched flush instead of centered.
    pub justify_full_threshold: f64,
    /// Longest accepted title, in characters.
    pub max_title_len: usize,
    /// Title block arrangement.
    pub title: TitleMode,
    /// Caption above the title in [`TitleMode::Masthead`].
    pub masthead_text: String,
    /// Optional quote block; `None` skips it entirely.
    pub epigraph: Option<Epigraph>,
    /// Legend labels.
    pub legend: LegendLabels,
}

impl Default for Style {
    fn default() -> Self {
        Self::poster()
    }
}

impl Style {
    /// A1 poster preset: Sunday-anchored rows, masthead title block, and
    /// the classic epigraph.
    pub fn poster() -> Self {
        Self {
            page: PageSize {
                width: 1683.0,
                height: 2383.0,
            },
            margins: PageMargins {
                top: 330.0,
                bottom: 120.0,
                box_margin: 6.0,
                box_line_width: 3.0,
            },
            anchor: WeekStart::Sunday,
            fonts: FontSet {
                face: "Helvetica".to_owned(),
                title_size: 44.0,
                label_size: 16.0,
                tiny_size: 14.0,
            },
            palette: Palette {
                background: Rgb::new(1.0, 1.0, 1.0),
                cell_base: Rgb::new(1.0, 1.0, 1.0),
                birthday: Rgb::new(0.5, 0.5, 0.5),
                new_year: Rgb::new(0.8, 0.8, 0.8),
                border: Rgb::new(0.0, 0.0, 0.0),
                text: Rgb::new(0.0, 0.0, 0.0),
                masthead: Rgb::new(0.5, 0.5, 0.5),
                epigraph: Rgb::new(0.4, 0.4, 0.4),
                attribution: Rgb::new(0.6, 0.6, 0.6),
                faint: Rgb::new(0.7, 0.7, 0.7),
            },
            darken_delta: -0.4,
            justify_full_threshold: 0.75,
            max_title_len: 50,
            title: TitleMode::Masthead,
            masthead_text: "LIFE CALENDAR".to_owned(),
            epigraph: Some(Epigraph {
                text: "\"Remembering that I'll be dead soon is the most important tool \
                       I've ever encountered to help me make the big choices in life. Because \
                       almost everything\u{2014}all external expectations, all pride, all fear \
                       of embarrassment or failure\u{2014}these things just fall away in the \
                       face of death, leaving only what is truly important.\""
                    .to_owned(),
                attribution: "\u{2014} Steve Jobs, 2005 Stanford University Commencement Speech"
                    .to_owned(),
            }),
            legend: LegendLabels {
                birthday: "Week of your birthday".to_owned(),
                new_year: "First week of the new year".to_owned(),
            },
        }
    }

    /// Compact preset: Monday-anchored rows, plain centered title, no
    /// epigraph, tighter top margin.
    pub fn plain() -> Self {
        Self {
            margins: PageMargins {
                top: 220.0,
                bottom: 120.0,
                box_margin: 6.0,
                box_line_width: 3.0,
            },
            anchor: WeekStart::Monday,
            fonts: FontSet {
                face: "Georgia".to_owned(),
                title_size: 44.0,
                label_size: 16.0,
                tiny_size: 14.0,
            },
            title: TitleMode::Plain,
            epigraph: None,
            ..Self::poster()
        }
    }

    /// Load a style from a JSON file.
    ///
    /// Missing fields fall back to [`Style::poster`] values; the result
    /// is validated before it is returned.
    pub fn from_json_path(path: &Path) -> LifegridResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read style '{}'", path.display()))?;
        let style: Self =
            serde_json::from_slice(&bytes).with_context(|| "parse style JSON")?;
        style.validate()?;
        Ok(style)
    }

    /// Check geometric and typographic sanity.
    pub fn validate(&self) -> LifegridResult<()> {
        if !self.page.width.is_finite()
            || self.page.width <= 0.0
            || !self.page.height.is_finite()
            || self.page.height <= 0.0
        {
            return Err(LifegridError::validation("page dimensions must be > 0"));
        }
        if self.margins.top < 0.0 || self.margins.bottom < 0.0 || self.margins.box_margin < 0.0 {
            return Err(LifegridError::validation("margins must be >= 0"));
        }
        if self.fonts.title_size <= 0.0
            || self.fonts.label_size <= 0.0
            || self.fonts.tiny_size <= 0.0
        {
            return Err(LifegridError::validation("font sizes must be > 0"));
        }
        if !self.justify_full_threshold.is_finite()
            || self.justify_full_threshold <= 0.0
            || self.justify_full_threshold > 1.0
        {
            return Err(LifegridError::validation(
                "justify_full_threshold must be in (0, 1]",
            ));
        }
        if !self.darken_delta.is_finite() {
            return Err(LifegridError::validation("darken_delta must be finite"));
        }
        if self.max_title_len == 0 {
            return Err(LifegridError::validation("max_title_len must be > 0"));
        }
        Ok(())
    }
}
