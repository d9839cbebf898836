//! Two-state toggle.

use tracing::debug;

use super::{Callback, Element, ElementStyle, PendingCall, Widget, WidgetHandle};
use crate::input::FrameInput;
use crate::render::{Canvas, Color, StyleScope};
use crate::ui::Ui;

const PADDING: f32 = 30.0;

/// Labels shown by a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleLabels {
    /// The same label in both states.
    Single(String),
    /// One label per state.
    Pair {
        /// Shown while off.
        off: String,
        /// Shown while on.
        on: String,
    },
}

impl ToggleLabels {
    /// Label for `value`.
    pub fn for_value(&self, value: bool) -> &str {
        match self {
            Self::Single(label) => label.as_str(),
            Self::Pair { off, .. } if !value => off.as_str(),
            Self::Pair { on, .. } => on.as_str(),
        }
    }

    fn all(&self) -> impl Iterator<Item = &str> {
        let (first, second) = match self {
            Self::Single(label) => (label.as_str(), None),
            Self::Pair { off, on } => (off.as_str(), Some(on.as_str())),
        };
        std::iter::once(first).chain(second)
    }
}

impl From<&str> for ToggleLabels {
    fn from(label: &str) -> Self {
        Self::Single(label.to_string())
    }
}

impl From<(&str, &str)> for ToggleLabels {
    fn from((off, on): (&str, &str)) -> Self {
        Self::Pair {
            off: off.to_string(),
            on: on.to_string(),
        }
    }
}

/// A button that flips a boolean on each press.
#[derive(Debug)]
pub struct Toggle {
    element: Element,
    labels: ToggleLabels,
    value: bool,
    on_color: Color,
    off_color: Color,
    on_click: Option<Callback<bool>>,
    prev_down: bool,
    pressed: bool,
}

impl Toggle {
    /// Start building a toggle.
    pub fn builder(labels: impl Into<ToggleLabels>) -> ToggleBuilder {
        ToggleBuilder {
            labels: labels.into(),
            x: 0.0,
            y: 0.0,
            value: false,
            on_click: None,
        }
    }

    /// Current state.
    pub fn value(&self) -> bool {
        self.value
    }

    /// Set the state without firing the callback.
    pub fn set_value(&mut self, value: bool) {
        self.value = value;
        self.element.set_label(self.labels.for_value(value));
    }

    fn draw(&self, canvas: &mut dyn Canvas, hovered: bool) {
        let mut canvas = StyleScope::new(canvas);
        self.element
            .apply_box_style(&mut *canvas, hovered, self.pressed, false);
        self.element.draw_box(&mut *canvas);
        self.element.apply_text_style(&mut *canvas);
        canvas.fill(if self.value {
            self.on_color
        } else {
            self.off_color
        });
        let center = self.element.center();
        canvas.text(self.element.label(), center.x, center.y);
    }
}

impl Widget for Toggle {
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
            self.set_value(!self.value);
            debug!(label = self.element.label(), value = self.value, "toggle flipped");
            fired = self
                .on_click
                .as_ref()
                .map(|callback| callback.pending(self.value));
        }
        self.prev_down = input.pointer_down;

        self.draw(canvas, hovered);
        fired
    }
}

impl WidgetHandle<Toggle> {
    /// Current state.
    pub fn value(&self) -> bool {
        self.read(Toggle::value)
    }

    /// Set the state without firing the callback.
    pub fn set_value(&self, value: bool) {
        self.write(|toggle| toggle.set_value(value));
    }
}

/// Builder for [`Toggle`].
#[derive(Debug)]
pub struct ToggleBuilder {
    labels: ToggleLabels,
    x: f32,
    y: f32,
    value: bool,
    on_click: Option<Callback<bool>>,
}

impl ToggleBuilder {
    /// Top-left corner.
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Initial state.
    pub fn value(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    /// Callback fired with the new state on each press.
    pub fn on_click(mut self, on_click: impl FnMut(bool) + 'static) -> Self {
        self.on_click = Some(Callback::new(on_click));
        self
    }

    /// Size the toggle to its widest label and register it with `ui`.
    pub fn build(self, ui: &mut Ui, canvas: &mut dyn Canvas) -> WidgetHandle<Toggle> {
        let font = ui.font(canvas);
        let theme = ui.theme();
        let width = self
            .labels
            .all()
            .map(|label| canvas.text_width(label, theme.font_size))
            .fold(0.0, f32::max)
            + PADDING;
        let element = Element::new(
            self.x,
            self.y,
            width,
            theme.widget_height,
            self.labels.for_value(self.value),
            ElementStyle::from_theme(theme),
            Some(font),
        );
        let handle = WidgetHandle::new(Toggle {
            element,
            labels: self.labels,
            value: self.value,
            on_color: theme.toggle_on,
            off_color: theme.toggle_off,
            on_click: self.on_click,
            prev_down: false,
            pressed: false,
        });
        ui.register(&handle);
        handle
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::render::{RenderCommand, Surface};
    use crate::style::Theme;

    #[test]
    fn flips_once_per_press() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(300.0, 100.0);
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        let toggle = Toggle::builder(("off", "on"))
            .position(0.0, 0.0)
            .on_click(move |value| sink.borrow_mut().push(value))
            .build(&mut ui, &mut surface);
        let held = FrameInput::at(10.0, 10.0).pressed();

        ui.run(&mut surface, &held);
        ui.run(&mut surface, &held);
        assert!(toggle.value());
        ui.run(&mut surface, &FrameInput::at(10.0, 10.0));
        ui.run(&mut surface, &held);
        assert!(!toggle.value());
        assert_eq!(*states.borrow(), vec![true, false]);
    }

    #[test]
    fn label_and_color_follow_state() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(300.0, 100.0);
        let toggle = Toggle::builder(("off", "enabled")).build(&mut ui, &mut surface);
        // widest label "enabled" is 42px wide
        assert_eq!(toggle.size(), (72.0, 30.0));

        toggle.set_value(true);
        assert_eq!(toggle.read(|toggle| toggle.element().label().to_string()), "enabled");
        toggle.run(&mut surface, &FrameInput::default());
        let color = surface.commands().commands().iter().find_map(|command| match command {
            RenderCommand::Text { style, .. } => Some(style.color),
            _ => None,
        });
        assert_eq!(color, Some(Theme::dark().toggle_on));
    }

    #[test]
    fn single_label_never_changes() {
        let labels = ToggleLabels::from("grid");
        assert_eq!(labels.for_value(false), "grid");
        assert_eq!(labels.for_value(true), "grid");
    }
}
