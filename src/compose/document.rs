use chrono::NaiveDate;

use crate::calendar::date::align_week_start;
use crate::calendar::grid::{
    Cell, CellClass, WEEK_COLUMNS, build_rows, cell_box_size, grid_x_margin,
};
use crate::compose::style::{Style, TitleMode};
use crate::foundation::core::{Point, Rect, Rgb};
use crate::foundation::error::{LifegridError, LifegridResult};
use crate::render::surface::{DrawOp, FontSpec, TextMetrics};
use crate::typeset::fit::{TextBlock, justify};

/// Fewest year rows a calendar may have.
pub const MIN_AGE_ROWS: u32 = 80;
/// Most year rows a calendar may have.
pub const MAX_AGE_ROWS: u32 = 100;

/// Everything that varies per calendar: the person, the span, the captions.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarSpec {
    /// Date of birth; its week anchors the first grid row.
    pub birth_date: NaiveDate,
    /// Headline text, at most the style's `max_title_len` characters.
    pub title: String,
    /// Number of year rows, `MIN_AGE_ROWS..=MAX_AGE_ROWS`.
    pub age_rows: u32,
    /// Weeks beginning strictly before this date are darkened; `None`
    /// darkens nothing.
    pub darken_until: Option<NaiveDate>,
    /// Caption rotated along the right edge of the grid.
    pub sidebar_text: Option<String>,
    /// Caption under the title block.
    pub subtitle_text: Option<String>,
}

/// Check `spec` against `style` without producing any draw ops.
///
/// Every violated bound gets its own message so callers can surface the
/// exact field that failed.
pub fn validate(spec: &CalendarSpec, style: &Style) -> LifegridResult<()> {
    style.validate()?;

    if spec.title.chars().count() > style.max_title_len {
        return Err(LifegridError::validation(format!(
            "title must be at most {} characters",
            style.max_title_len
        )));
    }

    if spec.age_rows < MIN_AGE_ROWS || spec.age_rows > MAX_AGE_ROWS {
        return Err(LifegridError::validation(format!(
            "age must be between {MIN_AGE_ROWS} and {MAX_AGE_ROWS}"
        )));
    }

    Ok(())
}

/// Compose a full calendar page into an ordered draw-op sequence.
///
/// The sequence streams in paint order: background, title block, grid
/// with its index and date labels, optional sidebar, legend, page seal.
/// Validation runs first; nothing is emitted for an invalid spec.
///
/// `metrics` is consulted for every wrap, centering, and justification
/// decision, so two composes with the same inputs and the same metrics
/// produce identical sequences.
#[tracing::instrument(skip(spec, style, metrics), fields(rows = spec.age_rows))]
pub fn compose(
    spec: &CalendarSpec,
    style: &Style,
    metrics: &mut dyn TextMetrics,
) -> LifegridResult<Vec<DrawOp>> {
    validate(spec, style)?;

    let mut c = Composer {
        style,
        metrics,
        ops: Vec::new(),
    };

    c.rect(
        Rect::new(0.0, 0.0, style.page.width, style.page.height),
        style.palette.background,
        style.palette.background,
        0.0,
    );

    title_block(&mut c, spec);

    let start = align_week_start(spec.birth_date, style.anchor);
    let darken_until = spec.darken_until.map(|d| align_week_start(d, style.anchor));
    let x_margin = grid_block(&mut c, spec, start, darken_until)?;

    if let Some(sidebar) = &spec.sidebar_text {
        sidebar_block(&mut c, sidebar, x_margin);
    }

    legend_block(&mut c);

    c.ops.push(DrawOp::FinishPage);
    Ok(c.ops)
}

struct Composer<'a> {
    style: &'a Style,
    metrics: &'a mut dyn TextMetrics,
    ops: Vec<DrawOp>,
}

impl Composer<'_> {
    fn font(&self, size: f64) -> FontSpec {
        FontSpec::new(self.style.fonts.face.clone(), size)
    }

    fn set_font(&mut self, font: FontSpec) {
        self.metrics.set_font(&font);
        self.ops.push(DrawOp::SetFont { font });
    }

    fn set_color(&mut self, color: Rgb) {
        self.ops.push(DrawOp::SetColor { color });
    }

    fn rect(&mut self, rect: Rect, stroke: Rgb, fill: Rgb, stroke_width: f64) {
        self.ops.push(DrawOp::Rect {
            rect,
            stroke,
            fill,
            stroke_width,
        });
    }

    fn text(&mut self, origin: Point, text: impl Into<String>) {
        self.ops.push(DrawOp::Text {
            origin,
            text: text.into(),
        });
    }

    /// Center a run horizontally on `center_x` with its baseline at `y`.
    fn text_centered(&mut self, center_x: f64, y: f64, text: &str) {
        let width = self.metrics.measure_text(text).width;
        self.text(Point::new(center_x - width / 2.0, y), text);
    }

    /// Bordered square in the grid's box style.
    fn week_box(&mut self, x: f64, y: f64, size: f64, fill: Rgb) {
        self.rect(
            Rect::new(x, y, x + size, y + size),
            self.style.palette.border,
            fill,
            self.style.margins.box_line_width,
        );
    }
}

fn title_block(c: &mut Composer<'_>, spec: &CalendarSpec) {
    let style = c.style;
    let center_x = style.page.width / 2.0;

    match style.title {
        TitleMode::Masthead => {
            c.set_font(c.font(style.fonts.label_size + 2.0));
            c.set_color(style.palette.masthead);
            let masthead_h = c.metrics.measure_text(&style.masthead_text).height;
            let masthead_y = style.margins.top / 4.0 - masthead_h / 2.0;
            c.text_centered(center_x, masthead_y, &style.masthead_text);

            c.set_font(c.font(style.fonts.title_size).bold());
            c.set_color(style.palette.text);
            let title_y = masthead_y + 55.0;
            c.text_centered(center_x, title_y, &spec.title);

            let mut cursor_y = title_y;

            if let Some(epigraph) = &style.epigraph {
                c.set_font(c.font(style.fonts.label_size - 2.0).italic());
                c.set_color(style.palette.epigraph);

                let column_width = style.page.width - 400.0;
                let column_x = center_x - column_width / 2.0;
                let block = TextBlock::fit(c.metrics, &epigraph.text, column_width, 1.5);

                let body_top = title_y + 50.0;
                for (i, line) in block.lines.iter().enumerate() {
                    let y = body_top + i as f64 * block.line_height;
                    let is_last = i + 1 == block.lines.len();
                    let line_ops = justify(
                        c.metrics,
                        line,
                        Point::new(column_x, y),
                        column_width,
                        is_last,
                        style.justify_full_threshold,
                    );
                    c.ops.extend(line_ops);
                }

                c.set_font(c.font(style.fonts.label_size - 3.0));
                c.set_color(style.palette.attribution);
                let attribution_y = body_top + block.height() + 15.0;
                c.text_centered(center_x, attribution_y, &epigraph.attribution);

                cursor_y = attribution_y;
            }

            if let Some(subtitle) = &spec.subtitle_text {
                c.set_font(c.font(style.fonts.label_size));
                c.set_color(style.palette.faint);
                c.text_centered(center_x, cursor_y + 30.0, subtitle);
            }
        }
        TitleMode::Plain => {
            c.set_font(c.font(style.fonts.title_size).bold());
            c.set_color(style.palette.text);
            let title_h = c.metrics.measure_text(&spec.title).height;
            let title_y = style.margins.top / 2.0 - title_h / 2.0;
            c.text_centered(center_x, title_y, &spec.title);

            if let Some(subtitle) = &spec.subtitle_text {
                c.set_font(c.font(style.fonts.label_size));
                c.set_color(style.palette.faint);
                c.text_centered(center_x, title_y + 40.0, subtitle);
            }
        }
    }
}

/// Emit the grid plus its labels; returns the computed left margin for
/// the sidebar to hang off.
fn grid_block(
    c: &mut Composer<'_>,
    spec: &CalendarSpec,
    start: NaiveDate,
    darken_until: Option<NaiveDate>,
) -> LifegridResult<f64> {
    let style = c.style;
    let box_size = cell_box_size(
        style.page.height,
        style.margins.top,
        style.margins.bottom,
        spec.age_rows,
        style.margins.box_margin,
    )?;
    let x_margin = grid_x_margin(style.page.width, box_size, style.margins.box_margin);
    let step = box_size + style.margins.box_margin;
    let top_y = style.margins.top;

    let rows = build_rows(start, spec.birth_date, spec.age_rows, darken_until)?;

    // Column indices above the top row.
    c.set_font(c.font(style.fonts.tiny_size));
    c.set_color(style.palette.text);
    for col in 0..WEEK_COLUMNS {
        let label = (col + 1).to_string();
        let center = x_margin + col as f64 * step + box_size / 2.0;
        c.text_centered(center, top_y - box_size, &label);
    }

    // Row date labels are italic; boxes carry their colours inline.
    c.set_font(c.font(style.fonts.tiny_size).italic());

    for (r, row) in rows.iter().enumerate() {
        let pos_y = top_y + r as f64 * step;

        let Some(first) = row.first() else {
            continue;
        };
        let label = format_row_label(first.week_start);
        let ext = c.metrics.measure_text(&label);
        c.text(
            Point::new(
                x_margin - ext.width - box_size,
                pos_y + box_size / 2.0 + ext.height / 2.0,
            ),
            label,
        );

        for cell in row {
            let x = x_margin + cell.col as f64 * step;
            let fill = cell_fill(style, cell);
            c.week_box(x, pos_y, box_size, fill);
        }
    }

    Ok(x_margin)
}

fn format_row_label(date: NaiveDate) -> String {
    date.format("%d %b, %Y").to_string()
}

fn cell_fill(style: &Style, cell: &Cell) -> Rgb {
    let base = match cell.class {
        CellClass::Normal => style.palette.cell_base,
        CellClass::Birthday => style.palette.birthday,
        CellClass::NewYear => style.palette.new_year,
    };

    if cell.darkened {
        base.shifted(style.darken_delta)
    } else {
        base
    }
}

fn sidebar_block(c: &mut Composer<'_>, text: &str, x_margin: f64) {
    let style = c.style;

    c.set_font(c.font(style.fonts.label_size));
    c.set_color(style.palette.faint);
    let width = c.metrics.measure_text(text).width;

    // Anchored past the grid's right edge; the run climbs the page.
    let origin = Point::new(
        style.page.width - x_margin + 20.0,
        style.margins.top + width + 100.0,
    );
    c.ops.push(DrawOp::Rotate {
        radians: -std::f64::consts::FRAC_PI_2,
    });
    c.text(origin, text);
    c.ops.push(DrawOp::Rotate {
        radians: std::f64::consts::FRAC_PI_2,
    });
}

fn legend_block(c: &mut Composer<'_>) {
    let style = c.style;
    let box_size = 20.0;
    let y = style.page.height - 60.0;

    c.set_font(c.font(style.fonts.tiny_size));
    c.set_color(style.palette.text);

    let birthday_w = c.metrics.measure_text(&style.legend.birthday).width;
    let new_year_w = c.metrics.measure_text(&style.legend.new_year).width;
    let total = box_size * 4.0 + birthday_w + new_year_w + 60.0;
    let start_x = style.page.width / 2.0 - total / 2.0;

    let next_x = legend_item(
        c,
        start_x,
        y,
        box_size,
        style.palette.birthday,
        &style.legend.birthday,
    );
    legend_item(c, next_x, y, box_size, style.palette.new_year, &style.legend.new_year);
}

/// One swatch + label pair; returns the x where the next item starts.
fn legend_item(
    c: &mut Composer<'_>,
    x: f64,
    y: f64,
    box_size: f64,
    fill: Rgb,
    label: &str,
) -> f64 {
    c.week_box(x, y, box_size, fill);

    let label_x = x + box_size + box_size / 2.0;
    let ext = c.metrics.measure_text(label);
    c.text(
        Point::new(label_x, y + box_size / 2.0 + ext.height / 2.0),
        label,
    );

    label_x + ext.width + box_size * 2.0
}

#[cfg(test)]
#[path = "../../tests/unit/compose/document.rs"]
mod tests;
