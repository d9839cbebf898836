//! Colors and sizes shared by widgets and charts.

use crate::render::Color;

/// Visual theme for widgets and plots.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Widget box fill.
    pub fill: Color,
    /// Widget box fill while hovered.
    pub highlight_fill: Color,
    /// Widget outline.
    pub stroke: Color,
    /// Widget outline while pressed.
    pub pressed_stroke: Color,
    /// Label fill.
    pub text_fill: Color,
    /// Label stroke.
    pub text_stroke: Color,
    /// Placeholder and inactive text.
    pub muted_text: Color,
    /// Widget outline width.
    pub stroke_weight: f32,
    /// Default widget height.
    pub widget_height: f32,
    /// Widget font name.
    pub font_name: String,
    /// Widget font size.
    pub font_size: f32,
    /// Chart background (image mode).
    pub plot_background: Color,
    /// Chart frame, ticks and text.
    pub plot_foreground: Color,
    /// Default series color.
    pub series_color: Color,
    /// Toggle label color while on.
    pub toggle_on: Color,
    /// Toggle label color while off.
    pub toggle_off: Color,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dark theme: black boxes with gray outlines and white text.
    pub fn dark() -> Self {
        Self {
            fill: Color::gray8(0),
            highlight_fill: Color::gray8(32),
            stroke: Color::gray8(127),
            pressed_stroke: Color::gray8(255),
            text_fill: Color::gray8(255),
            text_stroke: Color::gray8(127),
            muted_text: Color::gray8(127),
            stroke_weight: 3.0,
            widget_height: 30.0,
            font_name: "Roboto".to_string(),
            font_size: 12.0,
            plot_background: Color::gray8(0),
            plot_foreground: Color::gray8(255),
            series_color: Color::gray8(255),
            toggle_on: Color::rgb8(96, 200, 120),
            toggle_off: Color::rgb8(200, 96, 96),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
