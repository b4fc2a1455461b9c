use crate::foundation::core::Point;
use crate::render::surface::{DrawOp, TextMetrics};

/// Greedy word wrap against live measurement.
///
/// Words accumulate onto a line while the joined candidate still fits in
/// `max_width` under the metrics' current font. Words never split: a word
/// wider than `max_width` stands alone on its own line and overflows.
pub fn wrap(metrics: &mut dyn TextMetrics, text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if metrics.measure_text(&candidate).width <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

/// Pre-wrapped paragraph with a fixed baseline advance.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    /// Original unwrapped text.
    pub source: String,
    /// Wrapped lines in top-to-bottom order.
    pub lines: Vec<String>,
    /// Vertical advance between consecutive baselines, in points.
    pub line_height: f64,
}

impl TextBlock {
    /// Wrap `text` to `max_width` under the metrics' current font.
    ///
    /// The baseline advance is the measured single-line height of the
    /// source text scaled by `line_spacing`.
    pub fn fit(
        metrics: &mut dyn TextMetrics,
        text: &str,
        max_width: f64,
        line_spacing: f64,
    ) -> Self {
        let lines = wrap(metrics, text, max_width);
        let line_height = metrics.measure_text(text).height * line_spacing;

        Self {
            source: text.to_owned(),
            lines,
            line_height,
        }
    }

    /// Total vertical space the block occupies.
    pub fn height(&self) -> f64 {
        self.line_height * self.lines.len() as f64
    }
}

/// Typeset one wrapped line across `target_width`, starting at `origin`.
///
/// Last lines, single words, and lines measuring under
/// `full_threshold * target_width` are centered on the span instead of
/// stretched. Everything else is fully justified: the word widths are
/// subtracted from the target and the slack is split evenly across the
/// inter-word gaps, one text op per word.
pub fn justify(
    metrics: &mut dyn TextMetrics,
    line: &str,
    origin: Point,
    target_width: f64,
    is_last: bool,
    full_threshold: f64,
) -> Vec<DrawOp> {
    let natural = metrics.measure_text(line).width;
    let words: Vec<&str> = line.split_whitespace().collect();

    if is_last || words.len() <= 1 || natural < full_threshold * target_width {
        let x = origin.x + (target_width - natural) / 2.0;
        return vec![DrawOp::Text {
            origin: Point::new(x, origin.y),
            text: line.to_owned(),
        }];
    }

    let word_widths: Vec<f64> = words
        .iter()
        .map(|word| metrics.measure_text(word).width)
        .collect();
    let total: f64 = word_widths.iter().sum();
    let gap = (target_width - total) / (words.len() - 1) as f64;

    let mut ops = Vec::with_capacity(words.len());
    let mut x = origin.x;
    for (word, width) in words.iter().zip(&word_widths) {
        ops.push(DrawOp::Text {
            origin: Point::new(x, origin.y),
            text: (*word).to_owned(),
        });
        x += width + gap;
    }

    ops
}

#[cfg(test)]
#[path = "../../tests/unit/typeset/fit.rs"]
mod tests;
