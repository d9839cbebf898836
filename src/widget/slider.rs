//! Horizontal value slider.

use tracing::debug;

use super::{Callback, Element, ElementStyle, PendingCall, Widget, WidgetHandle};
use crate::axis::NumberFormat;
use crate::input::FrameInput;
use crate::range::Range;
use crate::render::{Canvas, HAlign, StyleScope, VAlign};
use crate::text::truncate_to_width;
use crate::transform::AxisTransform;
use crate::ui::Ui;

const DEFAULT_WIDTH: f32 = 150.0;
const KNOB_DIAMETER: f32 = 14.0;
const TRACK_OFFSET: f32 = 0.65;
const LABEL_GAP: f32 = 8.0;

/// A draggable slider over `[min, max]`.
///
/// The value follows the pointer while dragging; `on_change` fires once when
/// the drag ends.
#[derive(Debug)]
pub struct Slider {
    element: Element,
    range: Range,
    value: f64,
    step_decimals: Option<usize>,
    on_change: Option<Callback<f64>>,
    dragging: bool,
    prev_down: bool,
}

impl Slider {
    /// Start building a slider over `[0, 1]`.
    pub fn builder() -> SliderBuilder {
        SliderBuilder {
            x: 0.0,
            y: 0.0,
            width: DEFAULT_WIDTH,
            range: Range::new(0.0, 1.0),
            value: None,
            step_decimals: None,
            label: String::new(),
            on_change: None,
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set the value, rounded to the step and clamped to the slider range.
    pub fn set_value(&mut self, value: f64) {
        self.value = self.range.clamp(self.quantize(value));
    }

    /// Value range.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Check whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn quantize(&self, value: f64) -> f64 {
        match self.step_decimals {
            Some(decimals) => {
                let scale = 10f64.powi(decimals as i32);
                (value * scale).round() / scale
            }
            None => value,
        }
    }

    fn track(&self) -> (f32, f32, f32) {
        let bounds = self.element.bounds();
        let y = bounds.min.y + bounds.height() * TRACK_OFFSET;
        (bounds.min.x, bounds.max.x, y)
    }

    fn transform(&self) -> AxisTransform {
        let (left, right, _) = self.track();
        AxisTransform::new(self.range.min, self.range.max, left, right)
    }

    /// Grab area: the whole element, widened by the knob radius.
    fn grab_contains(&self, input: &FrameInput) -> bool {
        let bounds = self.element.bounds();
        let radius = KNOB_DIAMETER * 0.5;
        let pointer = input.pointer;
        pointer.x >= bounds.min.x - radius
            && pointer.x <= bounds.max.x + radius
            && pointer.y >= bounds.min.y
            && pointer.y <= bounds.max.y
    }

    fn readout(&self) -> String {
        NumberFormat::infer(self.range.min, self.range.max, self.step_decimals).format(self.value)
    }

    fn draw(&self, canvas: &mut dyn Canvas, hovered: bool) {
        let style = self.element.style();
        let (left, right, track_y) = self.track();
        let mut canvas = StyleScope::new(canvas);

        canvas.stroke(style.stroke);
        canvas.stroke_weight(style.stroke_weight);
        canvas.line(left, track_y, right, track_y);

        let knob_x = self.transform().to_screen(self.value);
        canvas.fill(if hovered || self.dragging {
            style.highlight_fill
        } else {
            style.fill
        });
        canvas.stroke(if self.dragging {
            style.pressed_stroke
        } else {
            style.stroke
        });
        canvas.circle(knob_x, track_y, KNOB_DIAMETER);

        canvas.text_size(style.text_size);
        if let Some(font) = self.element.font() {
            canvas.text_font(font);
        }
        canvas.no_stroke();
        canvas.fill(style.text_fill);
        let top = self.element.bounds().min.y;
        let readout = self.readout();
        canvas.text_align(HAlign::Right, VAlign::Top);
        canvas.text(&readout, right, top);

        let label = self.element.label();
        if !label.is_empty() {
            let available = right - left - canvas.measure(&readout) - LABEL_GAP;
            let label = truncate_to_width(&*canvas, label, style.text_size, available);
            canvas.text_align(HAlign::Left, VAlign::Top);
            canvas.text(&label, left, top);
        }
    }
}

impl Widget for Slider {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn run(&mut self, canvas: &mut dyn Canvas, input: &FrameInput) -> Option<PendingCall> {
        let hovered = self.grab_contains(input);
        if !self.dragging && input.pointer_down && !self.prev_down && hovered {
            self.dragging = true;
            debug!(label = self.element.label(), "slider drag started");
        }

        let mut fired = None;
        if self.dragging {
            if input.pointer_down {
                let value = self.transform().to_data(input.pointer.x);
                self.set_value(value);
            } else {
                self.dragging = false;
                debug!(label = self.element.label(), value = self.value, "slider released");
                fired = self
                    .on_change
                    .as_ref()
                    .map(|callback| callback.pending(self.value));
            }
        }
        self.prev_down = input.pointer_down;

        self.draw(canvas, hovered);
        fired
    }
}

impl WidgetHandle<Slider> {
    /// Current value.
    pub fn value(&self) -> f64 {
        self.read(Slider::value)
    }

    /// Set the value, clamped to the slider range.
    pub fn set_value(&self, value: f64) {
        self.write(|slider| slider.set_value(value));
    }
}

/// Builder for [`Slider`].
#[derive(Debug)]
pub struct SliderBuilder {
    x: f32,
    y: f32,
    width: f32,
    range: Range,
    value: Option<f64>,
    step_decimals: Option<usize>,
    label: String,
    on_change: Option<Callback<f64>>,
}

impl SliderBuilder {
    /// Top-left corner.
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Track width.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Value range. Reversed bounds are swapped.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Range::new(min, max);
        self
    }

    /// Initial value; defaults to the middle of the range.
    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Round values to `decimals` places.
    pub fn step_decimals(mut self, decimals: usize) -> Self {
        self.step_decimals = Some(decimals);
        self
    }

    /// Label shown above the track.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Callback fired with the final value when a drag ends.
    pub fn on_change(mut self, on_change: impl FnMut(f64) + 'static) -> Self {
        self.on_change = Some(Callback::new(on_change));
        self
    }

    /// Register the slider with `ui`.
    pub fn build(self, ui: &mut Ui, canvas: &mut dyn Canvas) -> WidgetHandle<Slider> {
        let font = ui.font(canvas);
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
        let mut slider = Slider {
            element,
            range: self.range,
            value: self.range.midpoint(),
            step_decimals: self.step_decimals,
            on_change: self.on_change,
            dragging: false,
            prev_down: false,
        };
        slider.set_value(self.value.unwrap_or(slider.value));
        let handle = WidgetHandle::new(slider);
        ui.register(&handle);
        handle
    }
}
