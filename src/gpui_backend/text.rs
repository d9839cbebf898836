use std::sync::Arc;

use gpui::{SharedString, ShapedLine, TextRun, Window, WindowTextSystem, font, px};

use crate::text::TextMeasurer;

/// [`TextMeasurer`] backed by the window's text system.
pub struct GpuiTextMeasurer {
    text_system: Arc<WindowTextSystem>,
    family: SharedString,
}

impl GpuiTextMeasurer {
    /// Measure with `family` on `window`'s text system.
    pub fn new(window: &Window, family: impl Into<SharedString>) -> Self {
        Self {
            text_system: Arc::clone(window.text_system()),
            family: family.into(),
        }
    }

    fn shape(&self, text: &str, size: f32) -> ShapedLine {
        let run = TextRun {
            len: text.len(),
            font: font(self.family.clone()),
            color: gpui::black(),
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        self.text_system
            .shape_line(text.to_string().into(), px(size), &[run], None)
    }
}

impl TextMeasurer for GpuiTextMeasurer {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        f32::from(self.shape(text, size).width)
    }

    fn text_ascent(&self, size: f32) -> f32 {
        f32::from(self.shape("Hg", size).ascent)
    }

    fn text_descent(&self, size: f32) -> f32 {
        f32::from(self.shape("Hg", size).descent)
    }
}
