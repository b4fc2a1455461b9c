use crate::foundation::core::{PageSize, Point, Rect, Rgb};
use crate::foundation::error::{LifegridError, LifegridResult};
use crate::render::fonts::TextRuler;
use crate::render::surface::{Extents, FontSlant, FontSpec, FontWeight, Surface, TextMetrics};

/// [`Surface`] that accumulates SVG 1.1 markup.
///
/// Text is emitted as `<text>` elements and left to the viewer to shape;
/// measurement goes through the embedded [`TextRuler`] so composition
/// sees the same advance widths a preview raster will.
pub struct SvgSurface {
    ruler: TextRuler,
    page: PageSize,
    body: String,
    font: FontSpec,
    color: Rgb,
    rotation: f64,
    finished: bool,
}

impl SvgSurface {
    /// Surface over a fresh system-font ruler.
    pub fn new(page: PageSize) -> Self {
        Self::with_ruler(page, TextRuler::new())
    }

    /// Surface over a caller-prepared ruler (registered font files, etc.).
    pub fn with_ruler(page: PageSize, ruler: TextRuler) -> Self {
        Self {
            ruler,
            page,
            body: String::new(),
            font: FontSpec::new("sans-serif", 16.0),
            color: Rgb::new(0.0, 0.0, 0.0),
            rotation: 0.0,
            finished: false,
        }
    }

    /// Font database shared with the raster preview path.
    pub fn fontdb(&self) -> std::sync::Arc<usvg::fontdb::Database> {
        self.ruler.fontdb()
    }

    /// Consume the surface and return the finished SVG document.
    pub fn into_svg(self) -> String {
        let w = fmt_coord(self.page.width);
        let h = fmt_coord(self.page.height);
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}</svg>\n",
            self.body
        )
    }

    fn ensure_open(&self) -> LifegridResult<()> {
        if self.finished {
            return Err(LifegridError::validation(
                "surface is finished, no further drawing accepted",
            ));
        }
        Ok(())
    }

    fn font_attrs(&self) -> String {
        let mut attrs = format!(
            " font-family=\"'{}', sans-serif\" font-size=\"{}\"",
            xml_escape(&self.font.family),
            fmt_coord(self.font.size)
        );
        if self.font.weight == FontWeight::Bold {
            attrs.push_str(" font-weight=\"bold\"");
        }
        if self.font.slant == FontSlant::Italic {
            attrs.push_str(" font-style=\"italic\"");
        }
        attrs
    }
}

impl TextMetrics for SvgSurface {
    fn set_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
        self.ruler.set_font(font);
    }

    fn measure_text(&mut self, text: &str) -> Extents {
        self.ruler.measure_text(text)
    }
}

impl Surface for SvgSurface {
    fn draw_rect(
        &mut self,
        rect: Rect,
        stroke: Rgb,
        fill: Rgb,
        stroke_width: f64,
    ) -> LifegridResult<()> {
        self.ensure_open()?;

        let mut el = format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"",
            fmt_coord(rect.x0),
            fmt_coord(rect.y0),
            fmt_coord(rect.width()),
            fmt_coord(rect.height()),
            fill.to_hex()
        );
        if stroke_width > 0.0 {
            el.push_str(&format!(
                " stroke=\"{}\" stroke-width=\"{}\"",
                stroke.to_hex(),
                fmt_coord(stroke_width)
            ));
        }
        el.push_str("/>\n");

        self.body.push_str(&el);
        Ok(())
    }

    fn draw_text(&mut self, origin: Point, text: &str) -> LifegridResult<()> {
        self.ensure_open()?;

        let mut el = format!(
            "  <text x=\"{}\" y=\"{}\"{} fill=\"{}\"",
            fmt_coord(origin.x),
            fmt_coord(origin.y),
            self.font_attrs(),
            self.color.to_hex()
        );
        if self.rotation != 0.0 {
            el.push_str(&format!(
                " transform=\"rotate({} {} {})\"",
                fmt_coord(self.rotation.to_degrees()),
                fmt_coord(origin.x),
                fmt_coord(origin.y)
            ));
        }
        el.push('>');
        el.push_str(&xml_escape(text));
        el.push_str("</text>\n");

        self.body.push_str(&el);
        Ok(())
    }

    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn rotate(&mut self, radians: f64) {
        self.rotation += radians;
    }

    fn finish_page(&mut self) -> LifegridResult<()> {
        self.finished = true;
        Ok(())
    }
}

fn fmt_coord(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
