//! Text measurement.

/// Measures text for layout decisions.
///
/// Hosts implement this on top of their font system; every size argument is
/// the font size in logical pixels.
pub trait TextMeasurer {
    /// Advance width of a single line of text.
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// Distance from the baseline to the top of the tallest glyph.
    fn text_ascent(&self, size: f32) -> f32;

    /// Distance from the baseline to the bottom of the lowest glyph.
    fn text_descent(&self, size: f32) -> f32;

    /// Full line height (`ascent + descent`).
    fn line_height(&self, size: f32) -> f32 {
        self.text_ascent(size) + self.text_descent(size)
    }
}

/// Deterministic metrics where every character has the same advance.
///
/// Used for headless rendering and tests; proportions are close to a
/// regular sans-serif face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance per character as a fraction of the font size.
    pub advance: f32,
    /// Ascent as a fraction of the font size.
    pub ascent: f32,
    /// Descent as a fraction of the font size.
    pub descent: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.5,
            ascent: 0.75,
            descent: 0.25,
        }
    }
}

impl TextMeasurer for MonospaceMetrics {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * self.advance * size
    }

    fn text_ascent(&self, size: f32) -> f32 {
        self.ascent * size
    }

    fn text_descent(&self, size: f32) -> f32 {
        self.descent * size
    }
}

/// Shorten `text` with a trailing ellipsis until it fits into `max_width`.
///
/// Returns an empty string when not even the ellipsis fits.
pub fn truncate_to_width<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    size: f32,
    max_width: f32,
) -> String {
    if measurer.text_width(text, size) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let mut candidate: String = chars.iter().collect();
        candidate.push('…');
        if measurer.text_width(&candidate, size) <= max_width {
            return candidate;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_width_scales_with_length() {
        let metrics = MonospaceMetrics::default();
        assert_eq!(metrics.text_width("abcd", 10.0), 20.0);
        assert_eq!(metrics.line_height(12.0), 12.0);
    }

    #[test]
    fn truncate_keeps_fitting_text() {
        let metrics = MonospaceMetrics::default();
        assert_eq!(truncate_to_width(&metrics, "short", 10.0, 100.0), "short");
        assert_eq!(truncate_to_width(&metrics, "a long label", 10.0, 30.0), "a lon…");
        assert_eq!(truncate_to_width(&metrics, "label", 10.0, 2.0), "");
    }
}
