use std::ops::{Deref, DerefMut};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::text::TextMeasurer;

use super::{
    Affine, Color, DrawStyle, HAlign, RectMode, RenderCommand, ShapeStyle, Surface, TextStyle,
    VAlign,
};

/// Handle to a font created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(u32);

impl FontId {
    /// Wrap a host-specific font index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Host-specific font index.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Style and transform stacks shared by every canvas implementation.
#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    style: DrawStyle,
    style_stack: Vec<DrawStyle>,
    matrix: Affine,
    matrix_stack: Vec<Affine>,
}

impl CanvasState {
    /// Create a state with default style and identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current drawing style.
    pub fn style(&self) -> &DrawStyle {
        &self.style
    }

    /// Current drawing style, mutably.
    pub fn style_mut(&mut self) -> &mut DrawStyle {
        &mut self.style
    }

    /// Current transform.
    pub fn matrix(&self) -> Affine {
        self.matrix
    }

    /// Save the current style.
    pub fn push_style(&mut self) {
        self.style_stack.push(self.style.clone());
    }

    /// Restore the most recently saved style. Unbalanced pops are ignored.
    pub fn pop_style(&mut self) {
        if let Some(style) = self.style_stack.pop() {
            self.style = style;
        }
    }

    /// Save the current transform.
    pub fn push_matrix(&mut self) {
        self.matrix_stack.push(self.matrix);
    }

    /// Restore the most recently saved transform. Unbalanced pops are ignored.
    pub fn pop_matrix(&mut self) {
        if let Some(matrix) = self.matrix_stack.pop() {
            self.matrix = matrix;
        }
    }

    /// Translate the current transform.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.matrix = self.matrix.then_translate(dx, dy);
    }

    /// Rotate the current transform.
    pub fn rotate(&mut self, angle: f32) {
        self.matrix = self.matrix.then_rotate(angle);
    }

    /// Depth of the style stack.
    pub fn style_depth(&self) -> usize {
        self.style_stack.len()
    }

    /// Reset to the default style and identity transform.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The host canvas: text metrics, state, and a command sink.
///
/// Implementors provide the required methods; every primitive and style
/// setter is built on top of them and emits [`RenderCommand`]s in absolute
/// screen coordinates through [`Canvas::submit`].
pub trait Canvas: TextMeasurer {
    /// Canvas width in pixels.
    fn width(&self) -> f32;

    /// Canvas height in pixels.
    fn height(&self) -> f32;

    /// Style and transform state.
    fn state(&self) -> &CanvasState;

    /// Style and transform state, mutably.
    fn state_mut(&mut self) -> &mut CanvasState;

    /// Paint or record one command.
    fn submit(&mut self, command: RenderCommand);

    /// Load a font by name at a nominal size.
    fn create_font(&mut self, name: &str, size: f32) -> FontId;

    /// Create an offscreen surface sharing this canvas' text metrics.
    fn create_surface(&self, width: f32, height: f32) -> Surface;

    /// Current drawing style.
    fn style(&self) -> &DrawStyle {
        self.state().style()
    }

    /// Save the current style.
    fn push_style(&mut self) {
        self.state_mut().push_style();
    }

    /// Restore the most recently saved style.
    fn pop_style(&mut self) {
        self.state_mut().pop_style();
    }

    /// Save the current transform.
    fn push_matrix(&mut self) {
        self.state_mut().push_matrix();
    }

    /// Restore the most recently saved transform.
    fn pop_matrix(&mut self) {
        self.state_mut().pop_matrix();
    }

    /// Translate subsequent drawing.
    fn translate(&mut self, dx: f32, dy: f32) {
        self.state_mut().translate(dx, dy);
    }

    /// Rotate subsequent drawing (radians, clockwise on screen).
    fn rotate(&mut self, angle: f32) {
        self.state_mut().rotate(angle);
    }

    /// Set the fill color.
    fn fill(&mut self, color: Color) {
        self.state_mut().style_mut().fill = Some(color);
    }

    /// Disable filling.
    fn no_fill(&mut self) {
        self.state_mut().style_mut().fill = None;
    }

    /// Set the stroke color.
    fn stroke(&mut self, color: Color) {
        self.state_mut().style_mut().stroke = Some(color);
    }

    /// Disable outlines.
    fn no_stroke(&mut self) {
        self.state_mut().style_mut().stroke = None;
    }

    /// Set the stroke width.
    fn stroke_weight(&mut self, weight: f32) {
        self.state_mut().style_mut().stroke_weight = weight;
    }

    /// Set the font size.
    fn text_size(&mut self, size: f32) {
        self.state_mut().style_mut().text_size = size;
    }

    /// Set the text anchors.
    fn text_align(&mut self, h_align: HAlign, v_align: VAlign) {
        let style = self.state_mut().style_mut();
        style.h_align = h_align;
        style.v_align = v_align;
    }

    /// Select a font.
    fn text_font(&mut self, font: FontId) {
        self.state_mut().style_mut().font = Some(font);
    }

    /// Set how `rect` interprets its position.
    fn rect_mode(&mut self, mode: RectMode) {
        self.state_mut().style_mut().rect_mode = mode;
    }

    /// Width of `text` at the current font size.
    fn measure(&self, text: &str) -> f32 {
        self.text_width(text, self.style().text_size)
    }

    /// Ascent at the current font size.
    fn ascent(&self) -> f32 {
        self.text_ascent(self.style().text_size)
    }

    /// Descent at the current font size.
    fn descent(&self) -> f32 {
        self.text_descent(self.style().text_size)
    }

    /// Clear the canvas.
    fn background(&mut self, color: Color) {
        self.submit(RenderCommand::Background(color));
    }

    /// Draw a rectangle using the current rect mode.
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (x, y) = match self.style().rect_mode {
            RectMode::Corner => (x, y),
            RectMode::Center => (x - w * 0.5, y - h * 0.5),
        };
        let matrix = self.state().matrix();
        let a = matrix.apply(ScreenPoint::new(x, y));
        let b = matrix.apply(ScreenPoint::new(x + w, y + h));
        let rect = ScreenRect::new(
            ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
            ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)),
        );
        let style = ShapeStyle::from_draw_style(self.style());
        self.submit(RenderCommand::Rect { rect, style });
    }

    /// Draw a line with the current stroke. No-op without a stroke.
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let Some(color) = self.style().stroke else {
            return;
        };
        let matrix = self.state().matrix();
        let width = self.style().stroke_weight * matrix.scale();
        self.submit(RenderCommand::Line {
            start: matrix.apply(ScreenPoint::new(x1, y1)),
            end: matrix.apply(ScreenPoint::new(x2, y2)),
            color,
            width,
        });
    }

    /// Draw a circle centered on `(x, y)`.
    fn circle(&mut self, x: f32, y: f32, diameter: f32) {
        let matrix = self.state().matrix();
        let style = ShapeStyle::from_draw_style(self.style());
        self.submit(RenderCommand::Circle {
            center: matrix.apply(ScreenPoint::new(x, y)),
            diameter: diameter * matrix.scale(),
            style,
        });
    }

    /// Draw a triangle.
    #[allow(clippy::too_many_arguments)]
    fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        let matrix = self.state().matrix();
        let style = ShapeStyle::from_draw_style(self.style());
        self.submit(RenderCommand::Triangle {
            points: [
                matrix.apply(ScreenPoint::new(x1, y1)),
                matrix.apply(ScreenPoint::new(x2, y2)),
                matrix.apply(ScreenPoint::new(x3, y3)),
            ],
            style,
        });
    }

    /// Draw text anchored at `(x, y)` in the fill color. No-op without a fill.
    fn text(&mut self, text: &str, x: f32, y: f32) {
        let Some(color) = self.style().fill else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let matrix = self.state().matrix();
        let style = self.style();
        let text_style = TextStyle {
            color,
            size: style.text_size,
            h_align: style.h_align,
            v_align: style.v_align,
            rotation: matrix.rotation(),
            font: style.font,
        };
        self.submit(RenderCommand::Text {
            position: matrix.apply(ScreenPoint::new(x, y)),
            text: text.to_string(),
            style: text_style,
        });
    }

    /// Replay a recorded surface with its top-left corner at `(x, y)`.
    fn image(&mut self, surface: &Surface, x: f32, y: f32) {
        let origin = self.state().matrix().apply(ScreenPoint::new(x, y));
        for command in surface.commands().commands() {
            match command {
                RenderCommand::Background(color) => {
                    let style = ShapeStyle {
                        fill: Some(*color),
                        stroke: None,
                        stroke_width: 0.0,
                    };
                    self.submit(RenderCommand::Rect {
                        rect: ScreenRect::from_origin_size(
                            origin.x,
                            origin.y,
                            surface.width(),
                            surface.height(),
                        ),
                        style,
                    });
                }
                other => self.submit(other.translated(origin.x, origin.y)),
            }
        }
    }
}

/// Saves the canvas style on creation and restores it on drop.
///
/// Dereferences to the canvas so drawing code reads the same inside the
/// scope.
pub struct StyleScope<'a> {
    canvas: &'a mut dyn Canvas,
}

impl<'a> StyleScope<'a> {
    /// Push the current style of `canvas`.
    pub fn new(canvas: &'a mut dyn Canvas) -> Self {
        canvas.push_style();
        Self { canvas }
    }
}

impl<'a> Deref for StyleScope<'a> {
    type Target = dyn Canvas + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl DerefMut for StyleScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl Drop for StyleScope<'_> {
    fn drop(&mut self) {
        self.canvas.pop_style();
    }
}

/// Saves the canvas transform on creation and restores it on drop.
pub struct MatrixScope<'a> {
    canvas: &'a mut dyn Canvas,
}

impl<'a> MatrixScope<'a> {
    /// Push the current transform of `canvas`.
    pub fn new(canvas: &'a mut dyn Canvas) -> Self {
        canvas.push_matrix();
        Self { canvas }
    }
}

impl<'a> Deref for MatrixScope<'a> {
    type Target = dyn Canvas + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl DerefMut for MatrixScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl Drop for MatrixScope<'_> {
    fn drop(&mut self) {
        self.canvas.pop_matrix();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Surface;

    #[test]
    fn style_scope_restores_on_drop() {
        let mut surface = Surface::headless(100.0, 100.0);
        surface.fill(Color::BLACK);
        {
            let mut scoped = StyleScope::new(&mut surface);
            scoped.fill(Color::WHITE);
            scoped.stroke_weight(4.0);
            assert_eq!(scoped.style().fill, Some(Color::WHITE));
        }
        assert_eq!(surface.style().fill, Some(Color::BLACK));
        assert_eq!(surface.style().stroke_weight, 1.0);
        assert_eq!(surface.state().style_depth(), 0);
    }

    #[test]
    fn center_rect_mode_offsets_origin() {
        let mut surface = Surface::headless(100.0, 100.0);
        surface.rect_mode(RectMode::Center);
        surface.rect(50.0, 50.0, 20.0, 10.0);
        let Some(RenderCommand::Rect { rect, .. }) = surface.commands().commands().last() else {
            panic!("expected a rect");
        };
        assert_eq!(*rect, ScreenRect::from_origin_size(40.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn matrix_scope_translates_primitives() {
        let mut surface = Surface::headless(100.0, 100.0);
        {
            let mut scoped = MatrixScope::new(&mut surface);
            scoped.translate(10.0, 5.0);
            scoped.line(0.0, 0.0, 1.0, 1.0);
        }
        surface.line(0.0, 0.0, 1.0, 1.0);
        let lines: Vec<_> = surface.commands().lines().collect();
        assert_eq!(lines[0].0, ScreenPoint::new(10.0, 5.0));
        assert_eq!(lines[1].0, ScreenPoint::new(0.0, 0.0));
    }

    #[test]
    fn image_replays_translated() {
        let mut picture = Surface::headless(20.0, 20.0);
        picture.begin_draw();
        picture.line(0.0, 0.0, 20.0, 20.0);
        picture.end_draw();

        let mut target = Surface::headless(200.0, 200.0);
        target.image(&picture, 50.0, 60.0);
        let lines: Vec<_> = target.commands().lines().collect();
        assert_eq!(lines, vec![(ScreenPoint::new(50.0, 60.0), ScreenPoint::new(70.0, 80.0))]);
    }
}
