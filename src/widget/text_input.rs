//! Single-line text field.

use tracing::debug;

use super::{Callback, Element, ElementStyle, PendingCall, Widget, WidgetHandle};
use crate::input::{FrameInput, Key};
use crate::render::{Canvas, Color, HAlign, StyleScope, VAlign};
use crate::text::truncate_to_width;
use crate::ui::{FocusScope, Ui};

const DEFAULT_WIDTH: f32 = 150.0;
const TEXT_INSET: f32 = 7.0;
const BLINK_PERIOD: f64 = 1.5;

/// A text field that takes keyboard input while focused.
///
/// Clicking inside focuses the field, clicking anywhere else releases it.
/// Focus is tracked by the shared [`FocusScope`], so at most one field is
/// active at a time.
#[derive(Debug)]
pub struct TextInput {
    element: Element,
    id: usize,
    focus: FocusScope,
    text: String,
    cursor: usize,
    placeholder: String,
    muted: Color,
    on_enter: Option<Callback<String>>,
    prev_key_down: bool,
    pressed: bool,
}

impl TextInput {
    /// Start building a text field.
    pub fn builder() -> TextInputBuilder {
        TextInputBuilder {
            x: 0.0,
            y: 0.0,
            width: DEFAULT_WIDTH,
            text: String::new(),
            placeholder: "enter input".to_string(),
            label: String::new(),
            on_enter: None,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and move the cursor to its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check whether this field has keyboard focus.
    pub fn is_active(&self) -> bool {
        self.focus.is_active(self.id)
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map_or(self.text.len(), |(index, _)| index)
    }

    /// Apply one key to the text.
    fn edit(&mut self, key: Key) -> Option<PendingCall> {
        let len = self.text.chars().count();
        match key {
            Key::Enter => {
                debug!(text = %self.text, "text input submitted");
                return self
                    .on_enter
                    .as_ref()
                    .map(|callback| callback.pending(self.text.clone()));
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(len),
            Key::Backspace if self.cursor > 0 => {
                let index = self.byte_index(self.cursor - 1);
                self.text.remove(index);
                self.cursor -= 1;
            }
            Key::Delete if self.cursor < len => {
                let index = self.byte_index(self.cursor);
                self.text.remove(index);
            }
            Key::Char(ch) => {
                let index = self.byte_index(self.cursor);
                self.text.insert(index, ch);
                self.cursor += 1;
            }
            Key::Backspace | Key::Delete | Key::Other => {}
        }
        None
    }

    fn draw(&self, canvas: &mut dyn Canvas, hovered: bool, time: f64) {
        let active = self.is_active();
        let bounds = self.element.bounds();
        let center = bounds.center();
        let text_x = bounds.min.x + TEXT_INSET;
        let text_size = self.element.style().text_size;

        let mut canvas = StyleScope::new(canvas);
        self.element
            .apply_box_style(&mut *canvas, hovered, self.pressed, true);
        self.element.draw_box(&mut *canvas);
        self.element.apply_text_style(&mut *canvas);

        if self.text.is_empty() && !active {
            canvas.fill(self.muted);
            canvas.text(&self.placeholder, text_x, center.y);
        } else {
            let available = bounds.width() - TEXT_INSET * 2.0;
            let visible = truncate_to_width(&*canvas, &self.text, text_size, available);
            canvas.text(&visible, text_x, center.y);
            if active && time.rem_euclid(BLINK_PERIOD) < BLINK_PERIOD * 0.5 {
                let shown = visible.chars().count();
                let kept = if visible == self.text {
                    shown
                } else {
                    shown.saturating_sub(1)
                };
                // a cursor inside the elided tail sits after the ellipsis
                let caret_chars = if self.cursor <= kept { self.cursor } else { shown };
                let before: String = visible.chars().take(caret_chars).collect();
                let caret_x = text_x + canvas.measure(&before);
                let half = text_size * 0.5;
                canvas.stroke(self.element.style().text_fill);
                canvas.stroke_weight(1.0);
                canvas.line(caret_x, center.y - half, caret_x, center.y + half);
            }
        }

        let label = self.element.label();
        if !label.is_empty() {
            canvas.fill(self.element.style().text_fill);
            canvas.text_align(HAlign::Left, VAlign::Center);
            canvas.text(label, bounds.max.x + TEXT_INSET, center.y);
        }
    }
}

impl Widget for TextInput {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn run(&mut self, canvas: &mut dyn Canvas, input: &FrameInput) -> Option<PendingCall> {
        let hovered = self.element.is_pointer_inside(input);
        self.pressed = false;
        if input.pointer_down {
            if hovered {
                self.pressed = true;
                if !self.focus.is_active(self.id) {
                    debug!(id = self.id, "text input focused");
                }
                self.focus.focus(self.id);
            } else {
                self.focus.release(self.id);
            }
        }

        let mut fired = None;
        let key_pressed = input.key_down && !self.prev_key_down;
        if key_pressed && self.is_active() && !self.focus.push_keys() {
            if let Some(key) = input.key {
                fired = self.edit(key);
            }
        }
        self.prev_key_down = input.key_down;

        self.draw(canvas, hovered, input.time);
        fired
    }

    fn key_pressed(&mut self, key: Key) -> Option<PendingCall> {
        if self.is_active() && self.focus.push_keys() {
            self.edit(key)
        } else {
            None
        }
    }
}

impl WidgetHandle<TextInput> {
    /// Current text.
    pub fn text(&self) -> String {
        self.read(|input| input.text().to_string())
    }

    /// Replace the text.
    pub fn set_text(&self, text: impl Into<String>) {
        self.write(|input| input.set_text(text));
    }

    /// Check whether the field has keyboard focus.
    pub fn is_active(&self) -> bool {
        self.read(TextInput::is_active)
    }
}

/// Builder for [`TextInput`].
#[derive(Debug)]
pub struct TextInputBuilder {
    x: f32,
    y: f32,
    width: f32,
    text: String,
    placeholder: String,
    label: String,
    on_enter: Option<Callback<String>>,
}

impl TextInputBuilder {
    /// Top-left corner.
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Box width.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Initial text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Hint shown while the field is empty and unfocused.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Label drawn to the right of the box.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Callback fired with the text when Enter is pressed.
    pub fn on_enter(mut self, on_enter: impl FnMut(String) + 'static) -> Self {
        self.on_enter = Some(Callback::new(on_enter));
        self
    }

    /// Register the field with `ui`.
    pub fn build(self, ui: &mut Ui, canvas: &mut dyn Canvas) -> WidgetHandle<TextInput> {
        let font = ui.font(canvas);
        let focus = ui.focus().clone();
        let theme = ui.theme();
        let element = Element::new(
            self.x,
            self.y,
            self.width,
            theme.widget_height,
            self.label,
            ElementStyle::from_theme(theme),
            Some(font),
        );
        let mut input = TextInput {
            element,
            id: focus.register(),
            focus,
            text: String::new(),
            cursor: 0,
            placeholder: self.placeholder,
            muted: theme.muted_text,
            on_enter: self.on_enter,
            prev_key_down: false,
            pressed: false,
        };
        input.set_text(self.text);
        let handle = WidgetHandle::new(input);
        ui.register(&handle);
        handle
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::render::Surface;

    fn typed(input: &FrameInput, key: Key) -> FrameInput {
        input.with_key(key)
    }

    #[test]
    fn click_focuses_and_click_elsewhere_releases() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 200.0);
        let field = TextInput::builder().position(10.0, 10.0).build(&mut ui, &mut surface);
        ui.run(&mut surface, &FrameInput::at(20.0, 20.0).pressed());
        assert!(field.is_active());
        ui.run(&mut surface, &FrameInput::at(20.0, 20.0));
        assert!(field.is_active());
        ui.run(&mut surface, &FrameInput::at(300.0, 150.0).pressed());
        assert!(!field.is_active());
    }

    #[test]
    fn polled_keys_edit_at_cursor() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 200.0);
        let field = TextInput::builder()
            .position(10.0, 10.0)
            .text("ac")
            .build(&mut ui, &mut surface);
        let idle = FrameInput::at(20.0, 20.0);
        ui.run(&mut surface, &idle.pressed());

        for key in [Key::Left, Key::Char('b'), Key::Right, Key::Char('d')] {
            ui.run(&mut surface, &typed(&idle, key));
            ui.run(&mut surface, &idle);
        }
        assert_eq!(field.text(), "abcd");

        for key in [Key::Left, Key::Left, Key::Backspace, Key::Delete] {
            ui.run(&mut surface, &typed(&idle, key));
            ui.run(&mut surface, &idle);
        }
        assert_eq!(field.text(), "ad");
        assert_eq!(field.read(TextInput::cursor), 1);
    }

    #[test]
    fn held_key_is_applied_once() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 200.0);
        let field = TextInput::builder().position(10.0, 10.0).build(&mut ui, &mut surface);
        let idle = FrameInput::at(20.0, 20.0);
        ui.run(&mut surface, &idle.pressed());
        let held = typed(&idle, Key::Char('x'));
        ui.run(&mut surface, &held);
        ui.run(&mut surface, &held);
        ui.run(&mut surface, &held);
        assert_eq!(field.text(), "x");
    }

    #[test]
    fn enter_submits_text() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 200.0);
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&submitted);
        let field = TextInput::builder()
            .position(10.0, 10.0)
            .text("hello")
            .on_enter(move |text| sink.borrow_mut().push(text))
            .build(&mut ui, &mut surface);
        let idle = FrameInput::at(20.0, 20.0);
        ui.run(&mut surface, &idle.pressed());
        ui.run(&mut surface, &typed(&idle, Key::Enter));
        assert_eq!(*submitted.borrow(), vec!["hello".to_string()]);
        assert_eq!(field.text(), "hello");
    }

    #[test]
    fn inactive_field_ignores_keys() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 200.0);
        let field = TextInput::builder().position(10.0, 10.0).build(&mut ui, &mut surface);
        ui.run(&mut surface, &FrameInput::at(300.0, 150.0).with_key(Key::Char('x')));
        assert_eq!(field.text(), "");
    }

    #[test]
    fn placeholder_until_focused() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 200.0);
        let field = TextInput::builder()
            .position(10.0, 10.0)
            .label("name")
            .build(&mut ui, &mut surface);
        field.run(&mut surface, &FrameInput::default());
        let texts: Vec<_> = surface.commands().texts().map(|(p, t)| (p.x, t.to_string())).collect();
        assert_eq!(
            texts,
            vec![(17.0, "enter input".to_string()), (167.0, "name".to_string())]
        );
    }

    #[test]
    fn caret_blinks_while_active() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 200.0);
        let field = TextInput::builder()
            .position(10.0, 10.0)
            .text("ab")
            .build(&mut ui, &mut surface);
        let press = FrameInput::at(20.0, 20.0).pressed();

        field.run(&mut surface, &press.at_time(0.2));
        let caret: Vec<_> = surface.commands().lines().collect();
        assert_eq!(caret.len(), 1);
        // "ab" is 12px wide, so the caret sits right after it
        assert_eq!(caret[0].0.x, 29.0);

        surface.begin_draw();
        field.run(&mut surface, &press.at_time(1.0));
        assert_eq!(surface.commands().lines().count(), 0);
    }

    #[test]
    fn caret_follows_elided_text() {
        let mut ui = Ui::new();
        let mut surface = Surface::headless(400.0, 200.0);
        let field = TextInput::builder()
            .position(10.0, 10.0)
            .text("a".repeat(30))
            .build(&mut ui, &mut surface);
        let press = FrameInput::at(20.0, 20.0).pressed().at_time(0.2);
        let caret_at = |surface: &mut Surface, cursor: usize| {
            field.write(|input| input.cursor = cursor);
            surface.begin_draw();
            field.run(surface, &press);
            let text = surface.commands().texts().next().map(|(_, t)| t.to_string());
            let caret = surface.commands().lines().next().map(|(start, _)| start.x);
            (text, caret)
        };

        // 136px fit 21 characters plus the ellipsis at 6px each
        let (text, caret) = caret_at(&mut surface, 30);
        assert_eq!(text, Some(format!("{}…", "a".repeat(21))));
        assert_eq!(caret, Some(17.0 + 22.0 * 6.0));
        assert_eq!(caret_at(&mut surface, 25).1, Some(17.0 + 22.0 * 6.0));
        assert_eq!(caret_at(&mut surface, 21).1, Some(17.0 + 21.0 * 6.0));
        assert_eq!(caret_at(&mut surface, 5).1, Some(17.0 + 5.0 * 6.0));
    }
}
