use crate::render::Color;

/// Window and input settings for [`run_sketch`](super::run_sketch).
#[derive(Debug, Clone)]
pub struct SketchConfig {
    /// Initial window width.
    pub width: f32,
    /// Initial window height.
    pub height: f32,
    /// Window title.
    pub title: String,
    /// Color behind the recorded frame.
    pub background: Color,
    /// Deliver key presses through [`Sketch::key_pressed`](super::Sketch::key_pressed)
    /// as they happen instead of only in the per-frame snapshot.
    pub push_keys: bool,
    /// Font family used for text without an explicit font.
    pub font_family: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 360.0,
            title: "sketch".to_string(),
            background: Color::BLACK,
            push_keys: true,
            font_family: ".SystemUIFont".to_string(),
        }
    }
}
