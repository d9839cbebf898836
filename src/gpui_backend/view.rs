use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use gpui::prelude::*;
use gpui::{
    App, Application, Bounds, FocusHandle, Focusable, KeyDownEvent, KeyUpEvent, MouseButton,
    MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point, SharedString, TitlebarOptions,
    Window, WindowBounds, WindowOptions, canvas, div, point, px, size,
};
use tracing::{debug, error};

use crate::geom::ScreenPoint;
use crate::input::{FrameInput, Key, KeyEvent};
use crate::render::{Canvas, Surface};

use super::config::SketchConfig;
use super::paint::{paint_surface, to_hsla};
use super::text::GpuiTextMeasurer;

/// An application drawn once per frame.
pub trait Sketch: 'static {
    /// Called once before the first frame, with the surface already sized.
    fn setup(&mut self, _canvas: &mut dyn Canvas) {}

    /// Draw one frame.
    fn draw(&mut self, canvas: &mut dyn Canvas, input: &FrameInput);

    /// Handle a key press as it happens.
    fn key_pressed(&mut self, _event: KeyEvent) {}
}

impl<F> Sketch for F
where
    F: FnMut(&mut dyn Canvas, &FrameInput) + 'static,
{
    fn draw(&mut self, canvas: &mut dyn Canvas, input: &FrameInput) {
        self(canvas, input)
    }
}

#[derive(Debug)]
struct InputState {
    origin: Point<Pixels>,
    pointer: Point<Pixels>,
    pointer_down: bool,
    key_down: bool,
    key: Option<Key>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            origin: point(px(0.0), px(0.0)),
            pointer: point(px(-1.0), px(-1.0)),
            pointer_down: false,
            key_down: false,
            key: None,
        }
    }
}

impl InputState {
    fn snapshot(&self, time: f64) -> FrameInput {
        FrameInput {
            pointer: ScreenPoint::new(
                f32::from(self.pointer.x - self.origin.x),
                f32::from(self.pointer.y - self.origin.y),
            ),
            pointer_down: self.pointer_down,
            key_down: self.key_down,
            key: self.key,
            time,
        }
    }
}

/// A GPUI view that runs a [`Sketch`] on a fixed-rate redraw loop.
///
/// Every frame the sketch draws into a [`Surface`] sized to the view, which
/// is then painted with GPUI quads, paths and shaped text.
pub struct SketchView {
    sketch: Rc<RefCell<dyn Sketch>>,
    surface: Rc<RefCell<Option<Surface>>>,
    input: Rc<RefCell<InputState>>,
    initialized: Rc<Cell<bool>>,
    config: SketchConfig,
    focus_handle: FocusHandle,
    started: Instant,
}

impl SketchView {
    /// Create a view running `sketch`.
    pub fn new(sketch: impl Sketch, config: SketchConfig, cx: &mut Context<Self>) -> Self {
        Self {
            sketch: Rc::new(RefCell::new(sketch)),
            surface: Rc::new(RefCell::new(None)),
            input: Rc::new(RefCell::new(InputState::default())),
            initialized: Rc::new(Cell::new(false)),
            config,
            focus_handle: cx.focus_handle(),
            started: Instant::now(),
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        window.focus(&self.focus_handle);
        let mut input = self.input.borrow_mut();
        input.pointer = ev.position;
        input.pointer_down = true;
        cx.notify();
    }

    fn on_mouse_up(&mut self, ev: &MouseUpEvent, cx: &mut Context<Self>) {
        let mut input = self.input.borrow_mut();
        input.pointer = ev.position;
        input.pointer_down = false;
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        self.input.borrow_mut().pointer = ev.position;
        cx.notify();
    }

    fn on_key_down(&mut self, ev: &KeyDownEvent, cx: &mut Context<Self>) {
        let key = Key::from_name(&ev.keystroke.key, ev.keystroke.key_char.as_deref());
        {
            let mut input = self.input.borrow_mut();
            input.key_down = true;
            input.key = Some(key);
        }
        if self.config.push_keys {
            match self.sketch.try_borrow_mut() {
                Ok(mut sketch) => sketch.key_pressed(KeyEvent::new(key)),
                Err(_) => debug!(?key, "key dropped while the sketch is drawing"),
            }
        }
        cx.notify();
    }

    fn on_key_up(&mut self, _ev: &KeyUpEvent, cx: &mut Context<Self>) {
        self.input.borrow_mut().key_down = false;
        cx.notify();
    }
}

impl Focusable for SketchView {
    fn focus_handle(&self, _cx: &App) -> gpui::FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for SketchView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        window.request_animation_frame();

        let sketch = Rc::clone(&self.sketch);
        let surface = Rc::clone(&self.surface);
        let paint_source = Rc::clone(&self.surface);
        let input = Rc::clone(&self.input);
        let initialized = Rc::clone(&self.initialized);
        let family = SharedString::from(self.config.font_family.clone());
        let paint_family = family.clone();
        let time = self.started.elapsed().as_secs_f64();

        div()
            .track_focus(&self.focus_handle)
            .size_full()
            .bg(to_hsla(self.config.background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        record_frame(
                            &sketch,
                            &surface,
                            &input,
                            &initialized,
                            bounds,
                            time,
                            || Rc::new(GpuiTextMeasurer::new(window, family)),
                        );
                    },
                    move |bounds, (), window, cx| {
                        if let Some(surface) = paint_source.borrow().as_ref() {
                            paint_surface(surface, bounds, &paint_family, window, cx);
                        }
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_down(ev, window, cx);
                }),
            )
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_key_down(cx.listener(|this, ev, _, cx| {
                this.on_key_down(ev, cx);
            }))
            .on_key_up(cx.listener(|this, ev, _, cx| {
                this.on_key_up(ev, cx);
            }))
    }
}

fn record_frame(
    sketch: &RefCell<dyn Sketch>,
    surface: &RefCell<Option<Surface>>,
    input: &RefCell<InputState>,
    initialized: &Cell<bool>,
    bounds: Bounds<Pixels>,
    time: f64,
    measurer: impl FnOnce() -> Rc<GpuiTextMeasurer>,
) {
    let width = f32::from(bounds.size.width);
    let height = f32::from(bounds.size.height);
    let mut slot = surface.borrow_mut();
    let surface = match slot.take() {
        Some(existing) if existing.has_size(width, height) => existing,
        Some(existing) => existing.create_surface(width, height),
        None => Surface::new(width, height, measurer()),
    };
    let surface = slot.insert(surface);

    let frame = {
        let mut input = input.borrow_mut();
        input.origin = bounds.origin;
        input.snapshot(time)
    };

    let Ok(mut sketch) = sketch.try_borrow_mut() else {
        return;
    };
    surface.begin_draw();
    if !initialized.get() {
        debug!(width, height, "sketch setup");
        sketch.setup(surface);
        initialized.set(true);
    }
    sketch.draw(surface, &frame);
    surface.end_draw();
}

/// Open a window running `sketch` and block until the application exits.
pub fn run_sketch(config: SketchConfig, sketch: impl Sketch) {
    Application::new().run(move |cx: &mut App| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(config.width), px(config.height)),
                cx,
            ))),
            titlebar: Some(TitlebarOptions {
                title: Some(config.title.clone().into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let opened = cx.open_window(options, |window, cx| {
            let view = cx.new(|cx| SketchView::new(sketch, config, cx));
            window.focus(&view.focus_handle(cx));
            view
        });
        if let Err(err) = opened {
            error!(%err, "failed to open the sketch window");
            cx.quit();
            return;
        }
        cx.activate(true);
    });
}
