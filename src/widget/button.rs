//! Push button.

use tracing::debug;

use super::{Callback, Element, ElementStyle, PendingCall, Widget, WidgetHandle};
use crate::input::FrameInput;
use crate::render::{Canvas, StyleScope};
use crate::ui::Ui;

const PADDING: f32 = 30.0;

/// A labelled button that fires once per press.
#[derive(Debug)]
pub struct Button {
    element: Element,
    on_click: Option<Callback<()>>,
    prev_down: bool,
    pressed: bool,
}

impl Button {
    /// Start building a button labelled `label`.
    pub fn builder(label: impl Into<String>) -> ButtonBuilder {
        ButtonBuilder {
            label: label.into(),
            x: 0.0,
            y: 0.0,
            on_click: None,
        }
    }

    /// Check whether the button was held down in the last frame.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn draw(&self, canvas: &mut dyn Canvas, hovered: bool) {
        let mut canvas = StyleScope::new(canvas);
        self.element
            .apply_box_style(&mut *canvas, hovered, self.pressed, false);
        self.element.draw_box(&mut *canvas);
        self.element.apply_text_style(&mut *canvas);
        let center = self.element.center();
        canvas.text(self.element.label(), center.x, center.y);
    }
}

impl Widget for Button {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn run(&mut self, canvas: &mut dyn Canvas, input: &FrameInput) -> Option<PendingCall> {
        let hovered = self.element.is_pointer_inside(input);
        self.pressed = hovered && input.pointer_down;

        let mut fired = None;
        if self.pressed && !self.prev_down {
            debug!(label = self.element.label(), "button clicked");
            fired = self.on_click.as_ref().map(|callback| callback.pending(()));
        }
        self.prev_down = input.pointer_down;

        self.draw(canvas, hovered);
        fired
    }
}

/// Builder for [`Button`].
#[derive(Debug)]
pub struct ButtonBuilder {
    label: String,
    x: f32,
    y: f32,
    on_click: Option<Callback<()>>,
}

impl ButtonBuilder {
    /// Top-left corner.
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Callback fired on each press.
    pub fn on_click(mut self, mut on_click: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Callback::new(move |()| on_click()));
        self
    }

    /// Size the button to its label and register it with `ui`.
    pub fn build(self, ui: &mut Ui, canvas: &mut dyn Canvas) -> WidgetHandle<Button> {
        let font = ui.font(canvas);
        let theme = ui.theme();
        let width = canvas.text_width(&self.label, theme.font_size) + PADDING;
        let element = Element::new(
            self.x,
            self.y,
            width,
            theme.widget_height,
            self.label,
            ElementStyle::from_theme(theme),
            Some(font),
        );
        let handle = WidgetHandle::new(Button {
            element,
            on_click: self.on_click,
            prev_down: false,
            pressed: false,
        });
        ui.register(&handle);
        handle
    }
}
