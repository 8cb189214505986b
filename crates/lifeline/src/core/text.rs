//! Text measurement and wrapping for labels
//!
//! There is no font rasterizer here: widths are estimated from display
//! columns (`unicode-width`) times an average glyph advance.

use unicode_width::UnicodeWidthStr;

/// Average glyph advance as a fraction of the font size
pub const GLYPH_ADVANCE: f64 = 0.6;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT: f64 = 1.4;

/// Estimated rendered width of `text` in pixels
pub fn measure_text(text: &str, font_size: f64) -> f64 {
    UnicodeWidthStr::width(text) as f64 * font_size * GLYPH_ADVANCE
}

/// How many display columns fit in `width` pixels
pub fn columns_for_width(width: f64, font_size: f64) -> usize {
    if width <= 0.0 || font_size <= 0.0 {
        return 0;
    }
    (width / (font_size * GLYPH_ADVANCE)).floor() as usize
}

/// Wrap text to fit within a maximum width, breaking on word boundaries.
///
/// Returns a vector of lines, each fitting within `max_width` display columns.
/// If `max_width` is 0, or the label fits on one line, returns a single-element vector.
/// A single word wider than `max_width` is kept whole on its own line.
///
/// # Example
/// ```
/// use lifeline::core::wrap_label;
///
/// let lines = wrap_label("Debezium reads the WAL", 12);
/// assert_eq!(lines, vec!["Debezium", "reads the", "WAL"]);
/// ```
pub fn wrap_label(label: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || UnicodeWidthStr::width(label) <= max_width {
        return vec![label.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in label.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);

        if current_width == 0 {
            current_line = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}
