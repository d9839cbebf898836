//! Rendering primitives and the host canvas seam.
//!
//! Widgets and charts draw through the [`Canvas`] trait in immediate mode.
//! Every primitive ends up as a [`RenderCommand`] in absolute screen
//! coordinates, which a host either paints directly or records into a
//! [`Surface`] for later replay.

mod canvas;
mod surface;

pub use canvas::{Canvas, CanvasState, FontId, MatrixScope, StyleScope};
pub use surface::Surface;

use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    /// Create a color from 8-bit channels including alpha.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Create an opaque gray from a single 8-bit level.
    pub fn gray8(level: u8) -> Self {
        Self::rgb8(level, level, level)
    }

    /// Replace the alpha channel.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    /// Anchor at the left edge.
    #[default]
    Left,
    /// Anchor at the horizontal center.
    Center,
    /// Anchor at the right edge.
    Right,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    /// Anchor at the top of the ascent.
    Top,
    /// Anchor halfway between ascent and descent.
    Center,
    /// Anchor on the baseline.
    #[default]
    Baseline,
    /// Anchor at the bottom of the descent.
    Bottom,
}

/// How `rect` interprets its first two arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RectMode {
    /// `(x, y)` is the top-left corner.
    #[default]
    Corner,
    /// `(x, y)` is the center.
    Center,
}

/// Mutable drawing state of a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyle {
    /// Fill color, `None` disables filling.
    pub fill: Option<Color>,
    /// Stroke color, `None` disables outlines.
    pub stroke: Option<Color>,
    /// Stroke width in pixels.
    pub stroke_weight: f32,
    /// Font size in pixels.
    pub text_size: f32,
    /// Horizontal text anchor.
    pub h_align: HAlign,
    /// Vertical text anchor.
    pub v_align: VAlign,
    /// Rectangle interpretation.
    pub rect_mode: RectMode,
    /// Selected font, `None` uses the host default.
    pub font: Option<FontId>,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: Some(Color::BLACK),
            stroke_weight: 1.0,
            text_size: 12.0,
            h_align: HAlign::Left,
            v_align: VAlign::Baseline,
            rect_mode: RectMode::Corner,
            font: None,
        }
    }
}

/// Fill and outline of a closed shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    /// Fill color.
    pub fill: Option<Color>,
    /// Stroke color.
    pub stroke: Option<Color>,
    /// Stroke width.
    pub stroke_width: f32,
}

impl ShapeStyle {
    pub(crate) fn from_draw_style(style: &DrawStyle) -> Self {
        Self {
            fill: style.fill,
            stroke: style.stroke,
            stroke_width: style.stroke_weight,
        }
    }
}

/// Text styling captured at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Horizontal anchor.
    pub h_align: HAlign,
    /// Vertical anchor.
    pub v_align: VAlign,
    /// Rotation in radians around the anchor point.
    pub rotation: f32,
    /// Selected font.
    pub font: Option<FontId>,
}

/// 2D affine transform `(a, b, c, d, e, f)`.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    coeffs: [f32; 6],
}

impl Affine {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        coeffs: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Compose a translation after the current transform.
    pub fn then_translate(self, dx: f32, dy: f32) -> Self {
        self.multiply([1.0, 0.0, 0.0, 1.0, dx, dy])
    }

    /// Compose a rotation (radians, clockwise on screen) after the current transform.
    pub fn then_rotate(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        self.multiply([cos, sin, -sin, cos, 0.0, 0.0])
    }

    fn multiply(self, other: [f32; 6]) -> Self {
        let [a, b, c, d, e, f] = self.coeffs;
        let [oa, ob, oc, od, oe, of] = other;
        Self {
            coeffs: [
                a * oa + c * ob,
                b * oa + d * ob,
                a * oc + c * od,
                b * oc + d * od,
                a * oe + c * of + e,
                b * oe + d * of + f,
            ],
        }
    }

    /// Apply the transform to a point.
    pub fn apply(&self, point: ScreenPoint) -> ScreenPoint {
        let [a, b, c, d, e, f] = self.coeffs;
        ScreenPoint::new(
            a * point.x + c * point.y + e,
            b * point.x + d * point.y + f,
        )
    }

    /// Rotation component in radians.
    pub fn rotation(&self) -> f32 {
        self.coeffs[1].atan2(self.coeffs[0])
    }

    /// Uniform scale component.
    pub fn scale(&self) -> f32 {
        (self.coeffs[0] * self.coeffs[0] + self.coeffs[1] * self.coeffs[1]).sqrt()
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A single drawing operation in absolute screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Clear the whole target with a color.
    Background(Color),
    /// Draw an axis-aligned rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Fill and outline.
        style: ShapeStyle,
    },
    /// Draw a line segment.
    Line {
        /// Segment start.
        start: ScreenPoint,
        /// Segment end.
        end: ScreenPoint,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        width: f32,
    },
    /// Draw a circle.
    Circle {
        /// Circle center.
        center: ScreenPoint,
        /// Circle diameter.
        diameter: f32,
        /// Fill and outline.
        style: ShapeStyle,
    },
    /// Draw a triangle.
    Triangle {
        /// Triangle corners.
        points: [ScreenPoint; 3],
        /// Fill and outline.
        style: ShapeStyle,
    },
    /// Draw a single line of text.
    Text {
        /// Anchor position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

impl RenderCommand {
    /// Copy of the command moved by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        match self {
            Self::Background(color) => Self::Background(*color),
            Self::Rect { rect, style } => Self::Rect {
                rect: rect.translated(dx, dy),
                style: *style,
            },
            Self::Line {
                start,
                end,
                color,
                width,
            } => Self::Line {
                start: start.offset(dx, dy),
                end: end.offset(dx, dy),
                color: *color,
                width: *width,
            },
            Self::Circle {
                center,
                diameter,
                style,
            } => Self::Circle {
                center: center.offset(dx, dy),
                diameter: *diameter,
                style: *style,
            },
            Self::Triangle { points, style } => Self::Triangle {
                points: points.map(|point| point.offset(dx, dy)),
                style: *style,
            },
            Self::Text {
                position,
                text,
                style,
            } => Self::Text {
                position: position.offset(dx, dy),
                text: text.clone(),
                style: style.clone(),
            },
        }
    }
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Remove every command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over recorded text commands as `(position, text)`.
    pub fn texts(&self) -> impl Iterator<Item = (ScreenPoint, &str)> {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text { position, text, .. } => Some((*position, text.as_str())),
            _ => None,
        })
    }

    /// Iterate over recorded line segments as `(start, end)`.
    pub fn lines(&self) -> impl Iterator<Item = (ScreenPoint, ScreenPoint)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Line { start, end, .. } => Some((*start, *end)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affine_translate_then_rotate() {
        let transform = Affine::IDENTITY
            .then_translate(10.0, 20.0)
            .then_rotate(-std::f32::consts::FRAC_PI_2);
        let point = transform.apply(ScreenPoint::new(5.0, 0.0));
        assert!((point.x - 10.0).abs() < 1e-4);
        assert!((point.y - 15.0).abs() < 1e-4);
        assert!((transform.rotation() + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn translated_moves_every_point() {
        let command = RenderCommand::Triangle {
            points: [ScreenPoint::new(0.0, 0.0); 3],
            style: ShapeStyle::from_draw_style(&DrawStyle::default()),
        };
        let RenderCommand::Triangle { points, .. } = command.translated(3.0, 4.0) else {
            panic!("expected triangle");
        };
        assert!(points.iter().all(|point| *point == ScreenPoint::new(3.0, 4.0)));
    }

    #[test]
    fn gray8_is_opaque() {
        let gray = Color::gray8(255);
        assert_eq!(gray, Color::WHITE);
    }
}
