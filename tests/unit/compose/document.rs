use chrono::NaiveDate;

use super::*;
use crate::render::surface::Extents;

/// Metrics where every char is an 8pt cell on a 12pt line.
struct FixedMetrics;

impl TextMetrics for FixedMetrics {
    fn set_font(&mut self, _font: &FontSpec) {}

    fn measure_text(&mut self, text: &str) -> Extents {
        if text.is_empty() {
            return Extents::default();
        }
        Extents {
            width: 8.0 * text.chars().count() as f64,
            height: 12.0,
        }
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn spec() -> CalendarSpec {
    CalendarSpec {
        birth_date: d(1990, 6, 15),
        title: "Your Life in Weeks".to_owned(),
        age_rows: 80,
        darken_until: Some(d(2020, 1, 1)),
        sidebar_text: None,
        subtitle_text: None,
    }
}

fn rects(ops: &[DrawOp]) -> Vec<(Rect, Rgb, Rgb, f64)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Rect {
                rect,
                stroke,
                fill,
                stroke_width,
            } => Some((*rect, *stroke, *fill, *stroke_width)),
            _ => None,
        })
        .collect()
}

#[test]
fn validate_flags_overlong_titles() {
    let style = Style::poster();

    let mut ok = spec();
    ok.title = "x".repeat(50);
    validate(&ok, &style).unwrap();

    let mut long = spec();
    long.title = "x".repeat(51);
    let err = validate(&long, &style).unwrap_err();
    assert!(matches!(err, LifegridError::Validation(_)), "{err}");
    assert!(err.to_string().contains("title must be at most 50 characters"));
}

#[test]
fn validate_flags_age_outside_bounds() {
    let style = Style::poster();

    for age in [MIN_AGE_ROWS, MAX_AGE_ROWS] {
        let mut s = spec();
        s.age_rows = age;
        validate(&s, &style).unwrap();
    }

    for age in [MIN_AGE_ROWS - 1, MAX_AGE_ROWS + 1] {
        let mut s = spec();
        s.age_rows = age;
        let err = validate(&s, &style).unwrap_err();
        assert!(err.to_string().contains("age must be between 80 and 100"), "{err}");
    }
}

#[test]
fn compose_rejects_invalid_specs_up_front() {
    let mut bad = spec();
    bad.age_rows = 79;
    let err = compose(&bad, &Style::poster(), &mut FixedMetrics).unwrap_err();
    assert!(matches!(err, LifegridError::Validation(_)), "{err}");
}

#[test]
fn background_opens_and_page_seal_closes_the_sequence() {
    let style = Style::poster();
    let ops = compose(&spec(), &style, &mut FixedMetrics).unwrap();

    let DrawOp::Rect { rect, fill, .. } = &ops[0] else {
        panic!("expected background Rect, got {:?}", ops[0]);
    };
    assert_eq!(*fill, style.palette.background);
    assert_eq!(rect.x1 - rect.x0, style.page.width);
    assert_eq!(rect.y1 - rect.y0, style.page.height);

    assert_eq!(ops.last(), Some(&DrawOp::FinishPage));
}

#[test]
fn rect_census_counts_cells_and_legend() {
    let ops = compose(&spec(), &Style::poster(), &mut FixedMetrics).unwrap();
    // Background, one box per week cell, two legend swatches.
    assert_eq!(rects(&ops).len(), 1 + 80 * WEEK_COLUMNS + 2);
}

#[test]
fn first_cell_rect_sits_on_the_grid_origin() {
    let style = Style::poster();
    let ops = compose(&spec(), &style, &mut FixedMetrics).unwrap();
    let rects = rects(&ops);

    let box_size = cell_box_size(
        style.page.height,
        style.margins.top,
        style.margins.bottom,
        80,
        style.margins.box_margin,
    )
    .unwrap();
    let x_margin = grid_x_margin(style.page.width, box_size, style.margins.box_margin);

    let (rect, stroke, _, stroke_width) = rects[1];
    assert!((rect.x0 - x_margin).abs() <= 1e-9);
    assert!((rect.y0 - style.margins.top).abs() <= 1e-9);
    assert!((rect.x1 - rect.x0 - box_size).abs() <= 1e-9);
    assert_eq!(stroke, style.palette.border);
    assert_eq!(stroke_width, style.margins.box_line_width);
}

#[test]
fn legend_swatches_are_the_last_two_rects() {
    let style = Style::poster();
    let ops = compose(&spec(), &style, &mut FixedMetrics).unwrap();
    let rects = rects(&ops);

    let n = rects.len();
    assert_eq!(rects[n - 2].2, style.palette.birthday);
    assert_eq!(rects[n - 1].2, style.palette.new_year);
}

#[test]
fn sidebar_rotation_brackets_its_text() {
    let mut with_sidebar = spec();
    with_sidebar.sidebar_text = Some("one week per box".to_owned());
    let ops = compose(&with_sidebar, &Style::poster(), &mut FixedMetrics).unwrap();

    let bracketed = ops.windows(3).any(|w| {
        matches!(
            w,
            [
                DrawOp::Rotate { radians: a },
                DrawOp::Text { text, .. },
                DrawOp::Rotate { radians: b },
            ] if *a < 0.0 && *b > 0.0 && text == "one week per box"
        )
    });
    assert!(bracketed, "no rotate/text/rotate run found");

    let plain = compose(&spec(), &Style::poster(), &mut FixedMetrics).unwrap();
    assert!(!plain.iter().any(|op| matches!(op, DrawOp::Rotate { .. })));
}

#[test]
fn cell_fill_darkens_with_clamp() {
    let mut style = Style::poster();
    let cell = Cell {
        row: 0,
        col: 0,
        week_start: d(1990, 6, 10),
        class: CellClass::Birthday,
        darkened: true,
    };

    let fill = cell_fill(&style, &cell);
    assert!((fill.r - 0.1).abs() <= 1e-9);

    // A deeper delta bottoms out at black instead of going negative.
    style.darken_delta = -0.9;
    let fill = cell_fill(&style, &cell);
    assert_eq!(fill, Rgb::new(0.0, 0.0, 0.0));

    let mut bright = cell;
    bright.darkened = false;
    assert_eq!(cell_fill(&style, &bright), style.palette.birthday);
}

#[test]
fn plain_style_skips_the_masthead() {
    let style = Style::plain();
    let ops = compose(&spec(), &style, &mut FixedMetrics).unwrap();
    assert!(
        !ops.iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if *text == style.masthead_text))
    );

    let poster = Style::poster();
    let ops = compose(&spec(), &poster, &mut FixedMetrics).unwrap();
    assert!(
        ops.iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if *text == poster.masthead_text))
    );
}

#[test]
fn compose_is_deterministic_under_fixed_metrics() {
    let a = compose(&spec(), &Style::poster(), &mut FixedMetrics).unwrap();
    let b = compose(&spec(), &Style::poster(), &mut FixedMetrics).unwrap();
    assert_eq!(a, b);
}
