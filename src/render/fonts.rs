use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{LifegridError, LifegridResult};
use crate::render::surface::{Extents, FontSlant, FontSpec, FontWeight, TextMetrics};

/// Trivial parley brush; measurement never paints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct MeasureBrush;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct FaceKey {
    family: String,
    weight: FontWeight,
    slant: FontSlant,
}

impl FaceKey {
    fn of(spec: &FontSpec) -> Self {
        Self {
            family: spec.family.to_lowercase(),
            weight: spec.weight,
            slant: spec.slant,
        }
    }
}

#[derive(Clone, Debug)]
enum FaceEntry {
    /// Resolved to a parley family registered in the collection.
    Family(String),
    /// No usable face; deterministic approximate metrics.
    Approximate,
}

/// Font-backed text measurement.
///
/// Faces resolve per `(family, weight, slant)` key: explicitly registered
/// font bytes win, then a system-font lookup by family with a sans-serif
/// fallback. Keys that resolve nowhere fall back to approximate metrics
/// with a one-time warning, so measurement itself never fails.
pub struct TextRuler {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
    fontdb: Arc<usvg::fontdb::Database>,
    resolved: HashMap<FaceKey, FaceEntry>,
    current: FontSpec,
}

impl Default for TextRuler {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRuler {
    /// Construct a ruler over the system font set.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fontdb: Arc::new(db),
            resolved: HashMap::new(),
            current: FontSpec::new("sans-serif", 16.0),
        }
    }

    /// Register raw font bytes to serve every weight and slant of `family`.
    ///
    /// The bytes are also loaded into the ruler's font database so a
    /// raster preview of the emitted SVG shapes text with the same face.
    pub fn register_font_bytes(&mut self, family: &str, bytes: &[u8]) -> LifegridResult<()> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            LifegridError::validation("no font families registered from font bytes")
        })?;

        let parley_family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LifegridError::validation("registered font family has no name"))?
            .to_string();

        for weight in [FontWeight::Normal, FontWeight::Bold] {
            for slant in [FontSlant::Normal, FontSlant::Italic] {
                let key = FaceKey {
                    family: family.to_lowercase(),
                    weight,
                    slant,
                };
                self.resolved
                    .insert(key, FaceEntry::Family(parley_family.clone()));
            }
        }

        Arc::make_mut(&mut self.fontdb).load_font_data(bytes.to_vec());
        Ok(())
    }

    /// Font database shared with the raster preview path.
    pub fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        Arc::clone(&self.fontdb)
    }

    fn resolve(&mut self, spec: &FontSpec) -> FaceEntry {
        let key = FaceKey::of(spec);
        if let Some(entry) = self.resolved.get(&key) {
            return entry.clone();
        }

        let entry = match self.lookup_system(spec) {
            Some(bytes) => match self.register_system_face(&bytes) {
                Some(parley_family) => FaceEntry::Family(parley_family),
                None => FaceEntry::Approximate,
            },
            None => FaceEntry::Approximate,
        };

        if matches!(entry, FaceEntry::Approximate) {
            tracing::warn!(
                family = %spec.family,
                "no usable font face found, measuring with approximate metrics"
            );
        }

        self.resolved.insert(key, entry.clone());
        entry
    }

    fn lookup_system(&self, spec: &FontSpec) -> Option<Vec<u8>> {
        let query = usvg::fontdb::Query {
            families: &[
                usvg::fontdb::Family::Name(&spec.family),
                usvg::fontdb::Family::SansSerif,
            ],
            weight: match spec.weight {
                FontWeight::Normal => usvg::fontdb::Weight(400),
                FontWeight::Bold => usvg::fontdb::Weight(700),
            },
            stretch: usvg::fontdb::Stretch::Normal,
            style: match spec.slant {
                FontSlant::Normal => usvg::fontdb::Style::Normal,
                FontSlant::Italic => usvg::fontdb::Style::Italic,
            },
        };

        let id = self.fontdb.query(&query)?;
        self.fontdb.with_face_data(id, |data, _index| data.to_vec())
    }

    fn register_system_face(&mut self, bytes: &[u8]) -> Option<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id)?;
        self.font_ctx
            .collection
            .family_name(family_id)
            .map(|name| name.to_string())
    }

    fn measure_with_family(&mut self, text: &str, family: &str, size: f64) -> Extents {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size as f32));
        builder.push_default(parley::style::StyleProperty::Brush(MeasureBrush));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut width = 0.0f64;
        let mut height = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            width = width.max(f64::from(m.advance));
            height += f64::from(m.ascent + m.descent + m.leading);
        }

        Extents { width, height }
    }
}

impl TextMetrics for TextRuler {
    fn set_font(&mut self, font: &FontSpec) {
        self.current = font.clone();
    }

    fn measure_text(&mut self, text: &str) -> Extents {
        if text.is_empty() {
            return Extents::default();
        }

        let spec = self.current.clone();
        match self.resolve(&spec) {
            FaceEntry::Family(family) => self.measure_with_family(text, &family, spec.size),
            FaceEntry::Approximate => approximate_extents(text, spec.size),
        }
    }
}

/// Width-class approximation for environments without any usable face.
///
/// Widths are per-character em fractions roughly matching a humanist
/// sans; the height is a typical line height for the size.
fn approximate_extents(text: &str, size: f64) -> Extents {
    let mut units = 0.0f64;
    for ch in text.chars() {
        units += match ch {
            'i' | 'j' | 'l' | '.' | ',' | '\'' | '|' | '!' | ':' | ';' => 0.28,
            'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '"' | ' ' => 0.35,
            'm' | 'w' | 'M' | 'W' | '\u{2014}' => 0.92,
            c if c.is_ascii_uppercase() => 0.72,
            c if c.is_ascii_digit() => 0.55,
            _ => 0.52,
        };
    }

    Extents {
        width: units * size,
        height: size * 1.18,
    }
}
