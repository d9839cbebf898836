use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gpui_sketchkit::{
    Button, Canvas, Col, Color, FrameInput, KeyEvent, LegendOptions, LineOptions, Plot, Row,
    ScatterOptions, ShowOptions, Sketch, SketchConfig, Slider, TextInput, Toggle, Ui,
    WidgetHandle, legend, logging, run_sketch,
};

struct Dashboard {
    ui: Ui,
    plot: Plot,
    points: Rc<Cell<bool>>,
    title: Rc<RefCell<String>>,
    slider: Option<WidgetHandle<Slider>>,
}

impl Dashboard {
    fn new() -> Self {
        Self {
            ui: Ui::new(),
            plot: Plot::new(220.0, 20.0, 400.0, 300.0),
            points: Rc::new(Cell::new(false)),
            title: Rc::new(RefCell::new("signal".to_string())),
            slider: None,
        }
    }
}

impl Sketch for Dashboard {
    fn setup(&mut self, canvas: &mut dyn Canvas) {
        self.ui.connect_keyboard();
        let points = Rc::clone(&self.points);
        let title = Rc::clone(&self.title);
        let reset_title = Rc::clone(&self.title);
        let mut slider = None;

        Col::builder()
            .position(10.0, 20.0)
            .build(&mut self.ui, |ui, col| {
                let freq = Slider::builder()
                    .range(0.5, 5.0)
                    .value(1.0)
                    .step_decimals(1)
                    .label("frequency")
                    .on_change(|value| tracing::info!(value, "frequency changed"))
                    .build(ui, canvas);
                let _ = col.add(&freq);
                slider = Some(freq);

                let row = Row::builder().build(ui, |ui, row| {
                    let scatter = Toggle::builder(("lines", "points"))
                        .on_click(move |value| points.set(value))
                        .build(ui, canvas);
                    let reset = Button::builder("reset")
                        .on_click(move || reset_title.borrow_mut().clear())
                        .build(ui, canvas);
                    let _ = row.add(&scatter);
                    let _ = row.add(&reset);
                });
                let _ = col.add(&row);

                let name = TextInput::builder()
                    .placeholder("plot title")
                    .on_enter(move |text| *title.borrow_mut() = text)
                    .build(ui, canvas);
                let _ = col.add(&name);
            });
        self.slider = slider;
    }

    fn draw(&mut self, canvas: &mut dyn Canvas, input: &FrameInput) {
        canvas.background(Color::gray8(20));
        self.ui.run(canvas, input);

        let frequency = self.slider.as_ref().map_or(1.0, |slider| slider.value());
        let xs: Vec<f64> = (0..200).map(|i| i as f64 * 0.05).collect();
        let ys: Vec<f64> = xs.iter().map(|x| (x * frequency).sin()).collect();
        if self.points.get() {
            self.plot.scatter(xs, ys, ScatterOptions::default());
        } else {
            self.plot.plot(xs, ys, LineOptions::default());
        }
        let options = ShowOptions::default()
            .with_title(self.title.borrow().as_str())
            .with_xlabel("time")
            .with_ylabel("amplitude");
        if self.plot.show(canvas, &options).is_ok() {
            let color = self.plot.theme().series_color;
            legend(
                canvas,
                &[("sin", color)],
                230.0,
                330.0,
                LegendOptions::default(),
            );
        }
    }

    fn key_pressed(&mut self, event: KeyEvent) {
        self.ui.key_pressed(event);
    }
}

fn main() {
    logging::init(logging::DEFAULT_FILTER);
    let config = SketchConfig {
        title: "dashboard".to_string(),
        ..Default::default()
    };
    run_sketch(config, Dashboard::new());
}
