use super::*;
use crate::render::surface::{Extents, FontSpec};

/// Metrics where every char is a fixed-width cell, spaces included.
struct CharGrid {
    char_width: f64,
    line_height: f64,
}

impl TextMetrics for CharGrid {
    fn set_font(&mut self, _font: &FontSpec) {}

    fn measure_text(&mut self, text: &str) -> Extents {
        if text.is_empty() {
            return Extents::default();
        }
        Extents {
            width: self.char_width * text.chars().count() as f64,
            height: self.line_height,
        }
    }
}

fn grid() -> CharGrid {
    CharGrid {
        char_width: 10.0,
        line_height: 10.0,
    }
}

fn text_op(op: &DrawOp) -> (f64, f64, &str) {
    let DrawOp::Text { origin, text } = op else {
        panic!("expected Text op, got {op:?}");
    };
    (origin.x, origin.y, text)
}

#[test]
fn wrap_packs_words_greedily() {
    let lines = wrap(&mut grid(), "aa bb cc dd", 60.0);
    assert_eq!(lines, vec!["aa bb", "cc dd"]);
}

#[test]
fn wrap_keeps_everything_on_one_line_when_it_fits() {
    let lines = wrap(&mut grid(), "aa bb cc", 800.0);
    assert_eq!(lines, vec!["aa bb cc"]);
}

#[test]
fn wrap_puts_an_overwide_word_alone_and_lets_it_overflow() {
    let lines = wrap(&mut grid(), "hi enormouslylongword yo", 40.0);
    assert_eq!(lines, vec!["hi", "enormouslylongword", "yo"]);

    let mut m = grid();
    assert!(m.measure_text(&lines[1]).width > 40.0);
}

#[test]
fn wrap_of_blank_text_is_empty() {
    assert!(wrap(&mut grid(), "", 100.0).is_empty());
    assert!(wrap(&mut grid(), "   \n\t ", 100.0).is_empty());
}

#[test]
fn wrap_collapses_interior_whitespace_runs() {
    let lines = wrap(&mut grid(), "aa    bb\ncc", 800.0);
    assert_eq!(lines, vec!["aa bb cc"]);
}

#[test]
fn text_block_height_is_lines_times_advance() {
    let block = TextBlock::fit(&mut grid(), "aa bb cc dd", 60.0, 1.5);
    assert_eq!(block.lines.len(), 2);
    assert!((block.line_height - 15.0).abs() <= 1e-9);
    assert!((block.height() - 30.0).abs() <= 1e-9);
}

#[test]
fn justify_centers_the_last_line() {
    let ops = justify(&mut grid(), "aaa bbb ccc", Point::new(5.0, 7.0), 200.0, true, 0.75);
    assert_eq!(ops.len(), 1);

    let (x, y, text) = text_op(&ops[0]);
    // natural width 110 centered on a 200pt span.
    assert!((x - (5.0 + 45.0)).abs() <= 1e-9);
    assert!((y - 7.0).abs() <= 1e-9);
    assert_eq!(text, "aaa bbb ccc");
}

#[test]
fn justify_centers_single_words_and_short_lines() {
    let single = justify(&mut grid(), "alone", Point::new(0.0, 0.0), 200.0, false, 0.75);
    assert_eq!(single.len(), 1);
    let (x, _, _) = text_op(&single[0]);
    assert!((x - 75.0).abs() <= 1e-9);

    // Natural width 50 is under 75% of the 100pt target.
    let short = justify(&mut grid(), "aa bb", Point::new(0.0, 0.0), 100.0, false, 0.75);
    assert_eq!(short.len(), 1);
    let (x, _, _) = text_op(&short[0]);
    assert!((x - 25.0).abs() <= 1e-9);
}

#[test]
fn justify_spreads_slack_evenly_across_gaps() {
    let ops = justify(&mut grid(), "aaa bbb ccc", Point::new(0.0, 4.0), 120.0, false, 0.75);
    assert_eq!(ops.len(), 3);

    let (x0, y0, t0) = text_op(&ops[0]);
    let (x1, _, t1) = text_op(&ops[1]);
    let (x2, _, t2) = text_op(&ops[2]);

    assert_eq!((t0, t1, t2), ("aaa", "bbb", "ccc"));
    assert!((y0 - 4.0).abs() <= 1e-9);

    // Word widths are 30 each; the 30pt slack splits into two 15pt gaps.
    assert!((x0 - 0.0).abs() <= 1e-9);
    assert!((x1 - 45.0).abs() <= 1e-9);
    assert!((x2 - 90.0).abs() <= 1e-9);

    // The final word lands flush with the right edge.
    let mut m = grid();
    let last_width = m.measure_text(t2).width;
    assert!((x2 + last_width - 120.0).abs() <= 1e-9);
}

#[test]
fn justify_starts_exactly_at_origin() {
    let ops = justify(&mut grid(), "aaa bbb ccc", Point::new(33.0, 0.0), 120.0, false, 0.75);
    let (x0, _, _) = text_op(&ops[0]);
    assert!((x0 - 33.0).abs() <= 1e-9);
}
