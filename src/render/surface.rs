use std::rc::Rc;

use crate::text::{MonospaceMetrics, TextMeasurer};

use super::{Canvas, CanvasState, FontId, RenderCommand, RenderList};

/// A recording canvas.
///
/// Surfaces back offscreen rendering ("image mode"): draw into one between
/// [`Surface::begin_draw`] and [`Surface::end_draw`], then replay it with
/// [`Canvas::image`]. The GPUI backend also records each frame into a surface
/// before painting it.
#[derive(Clone)]
pub struct Surface {
    width: f32,
    height: f32,
    state: CanvasState,
    render: RenderList,
    measurer: Rc<dyn TextMeasurer>,
    fonts: Vec<(String, f32)>,
    drawing: bool,
}

impl Surface {
    /// Create an empty surface measuring text with `measurer`.
    pub fn new(width: f32, height: f32, measurer: Rc<dyn TextMeasurer>) -> Self {
        Self {
            width,
            height,
            state: CanvasState::new(),
            render: RenderList::new(),
            measurer,
            fonts: Vec::new(),
            drawing: false,
        }
    }

    /// Create a surface with [`MonospaceMetrics`], for headless use.
    pub fn headless(width: f32, height: f32) -> Self {
        Self::new(width, height, Rc::new(MonospaceMetrics::default()))
    }

    /// Clear recorded commands and reset the drawing state.
    pub fn begin_draw(&mut self) {
        self.render.clear();
        self.state.reset();
        self.drawing = true;
    }

    /// Finish a drawing pass.
    pub fn end_draw(&mut self) {
        self.drawing = false;
    }

    /// Check whether a drawing pass is open.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Recorded commands.
    pub fn commands(&self) -> &RenderList {
        &self.render
    }

    /// Name and nominal size of a font created on this surface.
    pub fn font(&self, font: FontId) -> Option<(&str, f32)> {
        self.fonts
            .get(font.index() as usize)
            .map(|(name, size)| (name.as_str(), *size))
    }

    /// Check whether the surface has the given size.
    pub fn has_size(&self, width: f32, height: f32) -> bool {
        self.width == width && self.height == height
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("commands", &self.render.len())
            .field("drawing", &self.drawing)
            .finish()
    }
}

impl TextMeasurer for Surface {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        self.measurer.text_width(text, size)
    }

    fn text_ascent(&self, size: f32) -> f32 {
        self.measurer.text_ascent(size)
    }

    fn text_descent(&self, size: f32) -> f32 {
        self.measurer.text_descent(size)
    }
}

impl Canvas for Surface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn state(&self) -> &CanvasState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CanvasState {
        &mut self.state
    }

    fn submit(&mut self, command: RenderCommand) {
        self.render.push(command);
    }

    fn create_font(&mut self, name: &str, size: f32) -> FontId {
        if let Some(index) = self
            .fonts
            .iter()
            .position(|(existing, existing_size)| existing == name && *existing_size == size)
        {
            return FontId::new(index as u32);
        }
        self.fonts.push((name.to_string(), size));
        FontId::new((self.fonts.len() - 1) as u32)
    }

    fn create_surface(&self, width: f32, height: f32) -> Surface {
        Surface::new(width, height, Rc::clone(&self.measurer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    #[test]
    fn begin_draw_clears_previous_pass() {
        let mut surface = Surface::headless(10.0, 10.0);
        surface.begin_draw();
        surface.background(Color::BLACK);
        surface.fill(Color::BLACK);
        surface.end_draw();
        assert_eq!(surface.commands().len(), 1);

        surface.begin_draw();
        assert!(surface.commands().is_empty());
        assert!(surface.is_drawing());
        assert_eq!(surface.style().fill, Some(Color::WHITE));
    }

    #[test]
    fn fonts_are_deduplicated() {
        let mut surface = Surface::headless(10.0, 10.0);
        let a = surface.create_font("Roboto", 12.0);
        let b = surface.create_font("Roboto", 12.0);
        let c = surface.create_font("Roboto", 16.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(surface.font(c), Some(("Roboto", 16.0)));
    }
}
