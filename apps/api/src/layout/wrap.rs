//! Greedy word wrapping over a font-metric table.
//!
//! Explicit newlines start a new paragraph. Words are never split: a word
//! wider than the available width is placed alone on its own line, as is.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` so every line fits `max_width_pt`.
pub fn wrap(
    text: &str,
    max_width_pt: f32,
    metrics: &FontMetricTable,
    font_size_pt: f32,
) -> Vec<String> {
    wrap_hanging(text, max_width_pt, max_width_pt, metrics, font_size_pt)
}

/// Wraps `text` with a different width for the first output line.
///
/// Used where something is already drawn at the start of the first line
/// (a bold skill label) and the remaining lines return to the full width.
pub fn wrap_hanging(
    text: &str,
    first_width_pt: f32,
    rest_width_pt: f32,
    metrics: &FontMetricTable,
    font_size_pt: f32,
) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let space = metrics.space_width * font_size_pt;
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_width = metrics.measure_str(word) * font_size_pt;
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            let limit = if lines.is_empty() {
                first_width_pt
            } else {
                rest_width_pt
            };
            if current_width + space + word_width <= limit {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }

        // Blank interior lines are kept so paragraph spacing survives.
        lines.push(current);
    }

    lines
}
