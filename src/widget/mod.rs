//! Immediate-mode widgets.
//!
//! Every widget wraps an [`Element`] (geometry, label and colors) and is
//! driven once per frame through [`Widget::run`], which handles input and
//! draws in the same pass. Widgets are shared through [`WidgetHandle`]s so the
//! application, organizers and the [`Ui`](crate::ui::Ui) registry can all
//! refer to the same instance.

mod button;
mod slider;
mod text_input;
mod toggle;

pub use button::{Button, ButtonBuilder};
pub use slider::{Slider, SliderBuilder};
pub use text_input::{TextInput, TextInputBuilder};
pub use toggle::{Toggle, ToggleBuilder, ToggleLabels};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::geom::{ScreenPoint, ScreenRect};
use crate::input::{FrameInput, Key};
use crate::render::{Canvas, Color, FontId, HAlign, RectMode, VAlign};
use crate::style::Theme;

/// Colors and stroke applied to a widget box and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    /// Box fill.
    pub fill: Color,
    /// Box fill while hovered.
    pub highlight_fill: Color,
    /// Box outline.
    pub stroke: Color,
    /// Box outline while pressed.
    pub pressed_stroke: Color,
    /// Label fill.
    pub text_fill: Color,
    /// Label stroke.
    pub text_stroke: Color,
    /// Outline width.
    pub stroke_weight: f32,
    /// Label size.
    pub text_size: f32,
}

impl ElementStyle {
    /// Widget colors of `theme`.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            fill: theme.fill,
            highlight_fill: theme.highlight_fill,
            stroke: theme.stroke,
            pressed_stroke: theme.pressed_stroke,
            text_fill: theme.text_fill,
            text_stroke: theme.text_stroke,
            stroke_weight: theme.stroke_weight,
            text_size: theme.font_size,
        }
    }
}

/// Geometry, label and style shared by all widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    label: String,
    style: ElementStyle,
    font: Option<FontId>,
}

impl Element {
    /// Create an element with its top-left corner at `(x, y)`.
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        label: impl Into<String>,
        style: ElementStyle,
        font: Option<FontId>,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            label: label.into(),
            style,
            font,
        }
    }

    /// Top-left corner.
    pub fn position(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }

    /// Width and height.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Bounding box.
    pub fn bounds(&self) -> ScreenRect {
        ScreenRect::from_origin_size(self.x, self.y, self.width, self.height)
    }

    /// Center of the bounding box.
    pub fn center(&self) -> ScreenPoint {
        self.bounds().center()
    }

    /// Move the top-left corner.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Change the width.
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label text.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Box and label style.
    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    /// Box and label style, mutably.
    pub fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    /// Font used for the label.
    pub fn font(&self) -> Option<FontId> {
        self.font
    }

    /// Check whether the pointer is strictly inside the bounding box.
    pub fn is_pointer_inside(&self, input: &FrameInput) -> bool {
        self.bounds().contains(input.pointer)
    }

    /// Apply the box style. Rectangles are drawn from their center.
    pub fn apply_box_style(
        &self,
        canvas: &mut dyn Canvas,
        highlighted: bool,
        pressed: bool,
        left_align: bool,
    ) {
        canvas.stroke(if pressed {
            self.style.pressed_stroke
        } else {
            self.style.stroke
        });
        canvas.fill(if highlighted {
            self.style.highlight_fill
        } else {
            self.style.fill
        });
        canvas.stroke_weight(self.style.stroke_weight);
        canvas.text_size(self.style.text_size);
        if let Some(font) = self.font {
            canvas.text_font(font);
        }
        canvas.rect_mode(RectMode::Center);
        let h_align = if left_align {
            HAlign::Left
        } else {
            HAlign::Center
        };
        canvas.text_align(h_align, VAlign::Center);
    }

    /// Apply the label colors.
    pub fn apply_text_style(&self, canvas: &mut dyn Canvas) {
        canvas.fill(self.style.text_fill);
        canvas.stroke(self.style.text_stroke);
    }

    /// Draw the box centered in the element, inset by the stroke width.
    pub(crate) fn draw_box(&self, canvas: &mut dyn Canvas) {
        let center = self.center();
        let inset = self.style.stroke_weight;
        canvas.rect(center.x, center.y, self.width - inset, self.height - inset);
    }
}

/// A deferred widget callback.
///
/// Widgets return these from [`Widget::run`] instead of invoking callbacks
/// while they are borrowed, so callbacks may freely read other widgets.
#[must_use = "a pending call does nothing unless invoked"]
pub struct PendingCall(Box<dyn FnOnce()>);

impl PendingCall {
    /// Invoke the callback.
    pub fn call(self) {
        (self.0)()
    }
}

impl fmt::Debug for PendingCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PendingCall(..)")
    }
}

/// A shared callback receiving `A`.
pub struct Callback<A>(Rc<RefCell<dyn FnMut(A)>>);

impl<A: 'static> Callback<A> {
    /// Wrap a closure.
    pub fn new(callback: impl FnMut(A) + 'static) -> Self {
        Self(Rc::new(RefCell::new(callback)))
    }

    /// Prepare a call with `arg`.
    pub fn pending(&self, arg: A) -> PendingCall {
        let callback = Rc::clone(&self.0);
        PendingCall(Box::new(move || {
            match callback.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(arg),
                Err(_) => debug!("callback dropped while it is already running"),
            }
        }))
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// A widget driven once per frame.
pub trait Widget {
    /// Shared geometry and style.
    fn element(&self) -> &Element;

    /// Shared geometry and style, mutably.
    fn element_mut(&mut self) -> &mut Element;

    /// Handle input and draw. Returns a callback to invoke, if one fired.
    fn run(&mut self, canvas: &mut dyn Canvas, input: &FrameInput) -> Option<PendingCall>;

    /// Handle a key delivered push-style.
    fn key_pressed(&mut self, _key: Key) -> Option<PendingCall> {
        None
    }
}

/// Something an organizer can position.
pub trait Placeable {
    /// Final size, or `None` while it is still being built.
    fn size(&self) -> Option<(f32, f32)>;

    /// Top-left corner.
    fn position(&self) -> ScreenPoint;

    /// Move the top-left corner.
    fn move_to(&mut self, x: f32, y: f32);
}

impl<T: Widget> Placeable for T {
    fn size(&self) -> Option<(f32, f32)> {
        Some(self.element().size())
    }

    fn position(&self) -> ScreenPoint {
        self.element().position()
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.element_mut().move_to(x, y);
    }
}

/// Shared handle to a registered widget.
pub struct WidgetHandle<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for WidgetHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for WidgetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(widget) => f.debug_tuple("WidgetHandle").field(&*widget).finish(),
            Err(_) => f.write_str("WidgetHandle(<borrowed>)"),
        }
    }
}

impl<T: Widget + 'static> WidgetHandle<T> {
    /// Wrap a widget.
    pub fn new(widget: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(widget)),
        }
    }

    /// Read the widget state.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let widget = self.inner.borrow();
        f(&widget)
    }

    /// Mutate the widget state.
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut widget = self.inner.borrow_mut();
        f(&mut widget)
    }

    /// Run the widget outside a [`Ui`](crate::ui::Ui) sweep.
    pub fn run(&self, canvas: &mut dyn Canvas, input: &FrameInput) {
        let pending = self.inner.borrow_mut().run(canvas, input);
        if let Some(pending) = pending {
            pending.call();
        }
    }

    /// Top-left corner.
    pub fn position(&self) -> ScreenPoint {
        self.read(|widget| widget.element().position())
    }

    /// Width and height.
    pub fn size(&self) -> (f32, f32) {
        self.read(|widget| widget.element().size())
    }

    /// Move the widget.
    pub fn move_to(&self, x: f32, y: f32) {
        self.write(|widget| widget.element_mut().move_to(x, y));
    }

    pub(crate) fn as_widget(&self) -> Rc<RefCell<dyn Widget>> {
        self.inner.clone()
    }

    pub(crate) fn as_placeable(&self) -> Rc<RefCell<dyn Placeable>> {
        self.inner.clone()
    }
}

/// Run one widget and invoke its callback after releasing the borrow.
pub(crate) fn run_shared(widget: &RefCell<dyn Widget>, canvas: &mut dyn Canvas, input: &FrameInput) {
    let pending = match widget.try_borrow_mut() {
        Ok(mut widget) => widget.run(canvas, input),
        Err(_) => return,
    };
    if let Some(pending) = pending {
        pending.call();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderCommand, StyleScope, Surface};

    fn element() -> Element {
        Element::new(
            10.0,
            20.0,
            100.0,
            30.0,
            "label",
            ElementStyle::from_theme(&Theme::dark()),
            None,
        )
    }

    #[test]
    fn hit_test_is_strict() {
        let element = element();
        assert!(element.is_pointer_inside(&FrameInput::at(50.0, 30.0)));
        assert!(!element.is_pointer_inside(&FrameInput::at(10.0, 30.0)));
        assert!(!element.is_pointer_inside(&FrameInput::at(50.0, 50.0)));
        assert_eq!(element.center(), ScreenPoint::new(60.0, 35.0));
    }

    #[test]
    fn box_style_switches_on_state() {
        let element = element();
        let theme = Theme::dark();
        let mut surface = Surface::headless(200.0, 200.0);
        {
            let mut canvas = StyleScope::new(&mut surface);
            element.apply_box_style(&mut *canvas, true, true, true);
            assert_eq!(canvas.style().fill, Some(theme.highlight_fill));
            assert_eq!(canvas.style().stroke, Some(theme.pressed_stroke));
            assert_eq!(canvas.style().h_align, HAlign::Left);
            element.draw_box(&mut *canvas);
        }
        assert_eq!(surface.style().rect_mode, RectMode::Corner);
        let Some(RenderCommand::Rect { rect, .. }) = surface.commands().commands().first() else {
            panic!("expected a rect");
        };
        assert_eq!(*rect, ScreenRect::from_center_size(60.0, 35.0, 97.0, 27.0));
    }

    #[test]
    fn callbacks_can_be_invoked_repeatedly() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&hits);
        let callback = Callback::new(move |value: i32| sink.borrow_mut().push(value));
        callback.pending(1).call();
        callback.clone().pending(2).call();
        assert_eq!(*hits.borrow(), vec![1, 2]);
    }

    #[test]
    fn reentrant_call_is_dropped() {
        let slot: Rc<RefCell<Option<Callback<u32>>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(RefCell::new(Vec::new()));
        let (inner, sink) = (Rc::clone(&slot), Rc::clone(&hits));
        let callback = Callback::new(move |value: u32| {
            sink.borrow_mut().push(value);
            let nested = inner.borrow().as_ref().map(|callback| callback.pending(value + 1));
            if let Some(nested) = nested {
                nested.call();
            }
        });
        *slot.borrow_mut() = Some(callback.clone());

        callback.pending(1).call();
        assert_eq!(*hits.borrow(), vec![1]);
        callback.pending(5).call();
        assert_eq!(*hits.borrow(), vec![1, 5]);
    }
}
