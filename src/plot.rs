//! Chart engine.
//!
//! A [`Plot`] buffers series appended with [`Plot::plot`], [`Plot::scatter`]
//! and [`Plot::axvline`], then draws them all in one [`Plot::show`] call.
//! Every show consumes the buffer, whether it rendered or not.

use std::f32::consts::FRAC_PI_2;

use tracing::{trace, warn};

use crate::axis::{
    AxisSpan, CategoricalTicks, NumberFormat, NumericTickOptions, Tick, categorical_ticks,
    numeric_ticks,
};
use crate::error::PlotError;
use crate::geom::ScreenRect;
use crate::range::{Limits, Range};
use crate::render::{Canvas, Color, HAlign, MatrixScope, RectMode, StyleScope, Surface, VAlign};
use crate::series::{LineOptions, Marker, ScatterOptions, Series, SeriesKind, YAxis, YValues};
use crate::style::Theme;
use crate::text::TextMeasurer;
use crate::transform::AxisTransform;

const TEXT_SIZE: f32 = 14.0;
const TITLE_SIZE: f32 = 16.0;
const DATA_INSET: f32 = 15.0;
const TICK_LENGTH: f32 = 5.0;
const TICK_LABEL_GAP: f32 = 10.0;

/// Per-axis options for [`Plot::show`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YAxisOptions {
    /// Fixed decimal override for tick labels.
    pub decimals: Option<usize>,
    /// Clip values for numeric data.
    pub limits: Limits,
    /// Keep autoscaling the visible range inside `limits` (low, high).
    pub autoscale_in_limits: (bool, bool),
}

impl YAxisOptions {
    /// Limits that also pin the visible range.
    fn range_limits(&self) -> Limits {
        Limits {
            low: self.limits.low.filter(|_| !self.autoscale_in_limits.0),
            high: self.limits.high.filter(|_| !self.autoscale_in_limits.1),
        }
    }
}

/// Options for [`Plot::show`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShowOptions {
    /// Title above the frame.
    pub title: Option<String>,
    /// Label below the x ticks.
    pub xlabel: Option<String>,
    /// Rotated label left of the y ticks.
    pub ylabel: Option<String>,
    /// Fixed decimal override for x tick labels.
    pub x_decimals: Option<usize>,
    /// Options for the primary and secondary y axes.
    pub y_axes: [YAxisOptions; 2],
    /// Log when there is nothing to draw.
    pub empty_warning: bool,
    /// Outline the full plot bounds.
    pub show_outline: bool,
    /// Outline the data area.
    pub show_helper_lines: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            title: None,
            xlabel: None,
            ylabel: None,
            x_decimals: None,
            y_axes: [YAxisOptions::default(); 2],
            empty_warning: true,
            show_outline: false,
            show_helper_lines: false,
        }
    }
}

impl ShowOptions {
    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the x axis label.
    pub fn with_xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    /// Set the y axis label.
    pub fn with_ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    /// Fix the number of x label decimals.
    pub fn with_x_decimals(mut self, decimals: usize) -> Self {
        self.x_decimals = Some(decimals);
        self
    }

    /// Fix the number of label decimals on `axis`.
    pub fn with_y_decimals(mut self, axis: YAxis, decimals: usize) -> Self {
        self.y_axes[axis.index()].decimals = Some(decimals);
        self
    }

    /// Clip numeric data on `axis`.
    pub fn with_ylimit(mut self, axis: YAxis, low: Option<f64>, high: Option<f64>) -> Self {
        self.y_axes[axis.index()].limits = Limits::new(low, high);
        self
    }

    /// Keep autoscaling inside the limits of `axis`.
    pub fn with_autoscale_in_ylimits(mut self, axis: YAxis, low: bool, high: bool) -> Self {
        self.y_axes[axis.index()].autoscale_in_limits = (low, high);
        self
    }

    /// Stay silent when there is nothing to draw.
    pub fn without_empty_warning(mut self) -> Self {
        self.empty_warning = false;
        self
    }

    /// Outline the full plot bounds.
    pub fn with_outline(mut self) -> Self {
        self.show_outline = true;
        self
    }

    /// Outline the data area.
    pub fn with_helper_lines(mut self) -> Self {
        self.show_helper_lines = true;
        self
    }
}

/// Extra space reserved around the frame for text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    /// Above the frame.
    pub up: f32,
    /// Left of the frame.
    pub left: f32,
    /// Below the frame.
    pub bottom: f32,
    /// Right of the frame.
    pub right: f32,
}

/// Geometry and ticks of a rendered plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    /// Full plot bounds.
    pub outer: ScreenRect,
    /// Drawn frame; ticks hang off its edges.
    pub frame: ScreenRect,
    /// Area data is mapped into.
    pub data: ScreenRect,
    /// Combined x range of all series.
    pub x_range: Range,
    /// Visible numeric range per y axis; `None` for categorical or unused axes.
    pub y_ranges: [Option<Range>; 2],
    /// X ticks.
    pub x_ticks: Vec<Tick>,
    /// Ticks per y axis.
    pub y_ticks: [Vec<Tick>; 2],
}

impl PlotLayout {
    /// Frame and data rectangles for `outer` with `margins` reserved.
    pub fn frames(outer: ScreenRect, margins: Margins) -> (ScreenRect, ScreenRect) {
        let frame = ScreenRect::from_origin_size(
            outer.min.x + 20.0 + margins.left,
            outer.min.y + 10.0 + margins.up,
            outer.width() - 30.0 - margins.left - margins.right,
            outer.height() - 50.0 - margins.up - margins.bottom,
        );
        (frame, frame.inset(DATA_INSET))
    }

    /// Screen x of a data x value.
    pub fn x_to_screen(&self, x: f64) -> f32 {
        x_transform(self.x_range, self.data).to_screen(x)
    }

    /// Screen y of a numeric value on `axis`.
    pub fn y_to_screen(&self, axis: YAxis, y: f64) -> Option<f32> {
        let range = self.y_ranges[axis.index()]?;
        Some(y_transform(range, self.data).to_screen(y))
    }
}

fn x_transform(range: Range, data: ScreenRect) -> AxisTransform {
    AxisTransform::new(range.min, range.max, data.min.x, data.max.x)
}

fn y_transform(range: Range, data: ScreenRect) -> AxisTransform {
    AxisTransform::new(range.min, range.max, data.max.y, data.min.y)
}

/// Collected y data of one axis.
enum AxisData {
    Empty,
    Numeric {
        values: Vec<f64>,
        range: Range,
        format: NumberFormat,
    },
    Categorical {
        labels: Vec<String>,
        order: Option<Vec<String>>,
    },
}

/// How y values of one axis reach the screen.
enum YMapping {
    None,
    Numeric(Range),
    Categorical(CategoricalTicks),
}

impl AxisData {
    fn widest_label<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> f32 {
        match self {
            Self::Empty => 0.0,
            Self::Numeric { range, format, .. } => measurer
                .text_width(&format.format(range.min), TEXT_SIZE)
                .max(measurer.text_width(&format.format(range.max), TEXT_SIZE)),
            Self::Categorical { labels, .. } => labels
                .iter()
                .map(|label| measurer.text_width(label, TEXT_SIZE))
                .fold(0.0, f32::max),
        }
    }

    fn ticks<M: TextMeasurer + ?Sized>(
        &self,
        measurer: &M,
        span: AxisSpan,
        options: &YAxisOptions,
    ) -> (Vec<Tick>, YMapping) {
        match self {
            Self::Empty => (Vec::new(), YMapping::None),
            Self::Numeric { values, range, .. } => {
                let ticks = numeric_ticks(
                    measurer,
                    values,
                    span,
                    NumericTickOptions {
                        text_size: TEXT_SIZE,
                        decimals: options.decimals,
                        limits: options.range_limits(),
                    },
                );
                (ticks, YMapping::Numeric(*range))
            }
            Self::Categorical { labels, order } => {
                let categorical = categorical_ticks(labels, span, order.as_deref());
                (categorical.ticks.clone(), YMapping::Categorical(categorical))
            }
        }
    }
}

impl YMapping {
    fn map_all(&self, ys: &YValues, data: ScreenRect) -> Vec<Option<f32>> {
        match (self, ys) {
            (Self::Numeric(range), YValues::Numeric(values)) => {
                let transform = y_transform(*range, data);
                values.iter().map(|y| Some(transform.to_screen(*y))).collect()
            }
            (Self::Categorical(ticks), YValues::Categorical(labels)) => {
                labels.iter().map(|label| ticks.position(label)).collect()
            }
            _ => vec![None; ys.len()],
        }
    }

    fn range(&self) -> Option<Range> {
        match self {
            Self::Numeric(range) => Some(*range),
            _ => None,
        }
    }
}

/// Main chart container.
#[derive(Debug, Clone)]
pub struct Plot {
    bounds: ScreenRect,
    theme: Theme,
    series: Vec<Series>,
    surface: Option<Surface>,
    last_layout: Option<PlotLayout>,
}

impl Plot {
    /// Create a plot occupying the given rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::builder().bounds(x, y, width, height).build()
    }

    /// Start building a plot with custom configuration.
    pub fn builder() -> PlotBuilder {
        PlotBuilder::default()
    }

    /// Plot bounds.
    pub fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Move and resize the plot.
    pub fn move_to(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.bounds = ScreenRect::from_origin_size(x, y, width, height);
    }

    /// Series queued for the next show.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Queue a prepared series.
    pub fn add_series(&mut self, series: Series) -> &mut Self {
        self.series.push(series);
        self
    }

    /// Queue a line series. Empty or unequal-length input is ignored.
    pub fn plot(
        &mut self,
        xs: impl Into<Vec<f64>>,
        ys: impl Into<YValues>,
        options: LineOptions,
    ) -> &mut Self {
        if let Some(series) = Series::line(xs.into(), ys.into(), options) {
            self.series.push(series);
        }
        self
    }

    /// Queue a scatter series. Empty or unequal-length input is ignored.
    pub fn scatter(
        &mut self,
        xs: impl Into<Vec<f64>>,
        ys: impl Into<YValues>,
        options: ScatterOptions,
    ) -> &mut Self {
        if let Some(series) = Series::scatter(xs.into(), ys.into(), options) {
            self.series.push(series);
        }
        self
    }

    /// Queue full-height vertical lines at `xs`. Empty input is ignored.
    pub fn axvline(&mut self, xs: impl Into<Vec<f64>>, options: LineOptions) -> &mut Self {
        if let Some(series) = Series::vertical_markers(xs.into(), options) {
            self.series.push(series);
        }
        self
    }

    /// Draw the queued series onto `canvas` and clear the queue.
    pub fn show(
        &mut self,
        canvas: &mut dyn Canvas,
        options: &ShowOptions,
    ) -> Result<PlotLayout, PlotError> {
        let outer = self.bounds;
        self.render_into(canvas, outer, options)
    }

    /// Draw the queued series into the plot's own surface and return it.
    ///
    /// The surface is placed at the origin and reused until the plot size
    /// changes. A skipped render still leaves the surface holding the
    /// background; it stays reachable through [`Plot::image`].
    pub fn show_to_image(
        &mut self,
        host: &dyn Canvas,
        options: &ShowOptions,
    ) -> Result<&Surface, PlotError> {
        let (width, height) = (self.bounds.width(), self.bounds.height());
        let mut surface = match self.surface.take() {
            Some(surface) if surface.has_size(width, height) => surface,
            _ => host.create_surface(width, height),
        };
        surface.begin_draw();
        surface.background(self.theme.plot_background);
        let outer = ScreenRect::from_origin_size(0.0, 0.0, width, height);
        let result = self.render_into(&mut surface, outer, options);
        surface.end_draw();
        let surface: &Surface = self.surface.insert(surface);
        match result {
            Ok(_) => Ok(surface),
            Err(err) => Err(err),
        }
    }

    /// The surface of the most recent [`Plot::show_to_image`].
    pub fn image(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Layout of the most recent successful render.
    pub fn last_layout(&self) -> Option<&PlotLayout> {
        self.last_layout.as_ref()
    }

    fn render_into(
        &mut self,
        canvas: &mut dyn Canvas,
        outer: ScreenRect,
        options: &ShowOptions,
    ) -> Result<PlotLayout, PlotError> {
        let mut series = std::mem::take(&mut self.series);
        let result = render(canvas, &mut series, outer, &self.theme, options);
        self.last_layout = result.as_ref().ok().cloned();
        result
    }
}

/// Builder for configuring a plot before construction.
#[derive(Debug, Default)]
pub struct PlotBuilder {
    bounds: Option<ScreenRect>,
    theme: Theme,
}

impl PlotBuilder {
    /// Set the plot rectangle.
    pub fn bounds(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.bounds = Some(ScreenRect::from_origin_size(x, y, width, height));
        self
    }

    /// Set the theme used by the plot.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Build the plot. Bounds default to 500 x 200 at the origin.
    pub fn build(self) -> Plot {
        Plot {
            bounds: self
                .bounds
                .unwrap_or_else(|| ScreenRect::from_origin_size(0.0, 0.0, 500.0, 200.0)),
            theme: self.theme,
            series: Vec::new(),
            surface: None,
            last_layout: None,
        }
    }
}

/// `Some(categorical)` for the first series with y data on `axis`.
fn axis_kind(series: &[Series], axis: YAxis) -> Result<Option<bool>, PlotError> {
    let mut categorical = None;
    for series in series.iter().filter(|s| s.axis() == axis && !s.ys().is_empty()) {
        let is_categorical = series.ys().is_categorical();
        match categorical {
            None => categorical = Some(is_categorical),
            Some(existing) if existing != is_categorical => {
                let err = PlotError::MixedAxisKinds { axis };
                warn!(%err, "plot aborted");
                return Err(err);
            }
            Some(_) => {}
        }
    }
    Ok(categorical)
}

fn collect_axis(
    series: &mut [Series],
    axis: YAxis,
    categorical: Option<bool>,
    options: &YAxisOptions,
) -> AxisData {
    match categorical {
        // Only vertical markers: a single empty category.
        None if series.iter().any(|s| s.axis() == axis) => AxisData::Categorical {
            labels: vec![String::new()],
            order: None,
        },
        None => AxisData::Empty,
        Some(true) => {
            let mut labels = Vec::new();
            let mut order = None;
            for series in series.iter().filter(|s| s.axis() == axis) {
                if let YValues::Categorical(values) = series.ys() {
                    labels.extend(values.iter().cloned());
                }
                if let Some(series_order) = series.order() {
                    order = Some(series_order.to_vec());
                }
            }
            AxisData::Categorical { labels, order }
        }
        Some(false) => {
            let mut values = Vec::new();
            for series in series.iter_mut().filter(|s| s.axis() == axis) {
                if let YValues::Numeric(ys) = series.ys_mut() {
                    if options.limits.is_set() {
                        for y in ys.iter_mut() {
                            *y = options.limits.clip(*y);
                        }
                    }
                    values.extend(ys.iter().copied());
                }
            }
            let mut range =
                Range::from_values(values.iter().copied()).unwrap_or(Range { min: 0.0, max: 0.0 });
            let pinned = options.range_limits();
            if let Some(low) = pinned.low {
                range.min = low;
            }
            if let Some(high) = pinned.high {
                range.max = high;
            }
            let format = NumberFormat::infer(range.min, range.max, options.decimals);
            AxisData::Numeric {
                values,
                range,
                format,
            }
        }
    }
}

fn render(
    canvas: &mut dyn Canvas,
    series: &mut [Series],
    outer: ScreenRect,
    theme: &Theme,
    options: &ShowOptions,
) -> Result<PlotLayout, PlotError> {
    let primary_kind = axis_kind(series, YAxis::Primary)?;
    let secondary_kind = axis_kind(series, YAxis::Secondary)?;
    let multi_y = series.iter().any(|s| s.axis() == YAxis::Secondary);

    let axes = [
        collect_axis(series, YAxis::Primary, primary_kind, &options.y_axes[0]),
        collect_axis(series, YAxis::Secondary, secondary_kind, &options.y_axes[1]),
    ];

    let x_values: Vec<f64> = series
        .iter()
        .flat_map(|s| s.xs().iter().copied())
        .collect();
    let Some(x_range) = Range::from_values(x_values.iter().copied()) else {
        if options.empty_warning {
            warn!("the plot data is empty");
        }
        return Err(PlotError::Empty);
    };

    let foreground = theme.plot_foreground;
    let mut canvas = StyleScope::new(canvas);
    canvas.no_fill();
    canvas.stroke(foreground);
    canvas.stroke_weight(1.0);
    canvas.text_size(TEXT_SIZE);
    canvas.rect_mode(RectMode::Corner);

    let text_height = canvas.ascent() + canvas.descent();
    let margins = Margins {
        up: if options.title.is_some() { text_height } else { 0.0 },
        left: axes[0].widest_label(&*canvas)
            + if options.ylabel.is_some() { text_height } else { 0.0 },
        bottom: if options.xlabel.is_some() { text_height } else { 0.0 },
        right: if multi_y {
            axes[1].widest_label(&*canvas) + 2.0
        } else {
            0.0
        },
    };
    let (frame, data) = PlotLayout::frames(outer, margins);
    trace!(?frame, ?data, "plot geometry");

    let x_ticks = numeric_ticks(
        &*canvas,
        &x_values,
        AxisSpan::horizontal(data.min.x, data.max.x),
        NumericTickOptions {
            text_size: TEXT_SIZE,
            decimals: options.x_decimals,
            limits: Limits::NONE,
        },
    );
    let y_span = AxisSpan::vertical(data.min.y, data.max.y);
    let (primary_ticks, primary_map) = axes[0].ticks(&*canvas, y_span, &options.y_axes[0]);
    let (secondary_ticks, secondary_map) = axes[1].ticks(&*canvas, y_span, &options.y_axes[1]);

    draw_labels(&mut *canvas, outer, frame, text_height, foreground, options);

    if options.show_outline {
        canvas.rect(outer.min.x, outer.min.y, outer.width() - 1.0, outer.height() - 1.0);
    }
    if options.show_helper_lines {
        canvas.rect(data.min.x, data.min.y, data.width(), data.height());
    }
    canvas.rect(frame.min.x, frame.min.y, frame.width(), frame.height());

    {
        let mut ticks = StyleScope::new(&mut *canvas);
        ticks.stroke(foreground);
        ticks.fill(foreground);
        ticks.text_align(HAlign::Center, VAlign::Top);
        for tick in &x_ticks {
            ticks.line(tick.position, frame.max.y, tick.position, frame.max.y + TICK_LENGTH);
            ticks.text(&tick.label, tick.position, frame.max.y + TICK_LABEL_GAP);
        }
        let descent = ticks.descent();
        ticks.text_align(HAlign::Right, VAlign::Center);
        for tick in &primary_ticks {
            ticks.line(frame.min.x, tick.position, frame.min.x - TICK_LENGTH, tick.position);
            ticks.text(&tick.label, frame.min.x - TICK_LABEL_GAP, tick.position - descent);
        }
        if multi_y {
            ticks.text_align(HAlign::Left, VAlign::Center);
            for tick in &secondary_ticks {
                ticks.line(frame.max.x, tick.position, frame.max.x + TICK_LENGTH, tick.position);
                ticks.text(&tick.label, frame.max.x + TICK_LABEL_GAP, tick.position - descent);
            }
        }
    }

    for (axis, mapping) in [
        (YAxis::Secondary, &secondary_map),
        (YAxis::Primary, &primary_map),
    ] {
        for series in series.iter().filter(|s| s.axis() == axis) {
            draw_series(&mut *canvas, series, x_range, data, mapping, theme.series_color);
        }
    }

    Ok(PlotLayout {
        outer,
        frame,
        data,
        x_range,
        y_ranges: [primary_map.range(), secondary_map.range()],
        x_ticks,
        y_ticks: [primary_ticks, secondary_ticks],
    })
}

fn draw_labels(
    canvas: &mut dyn Canvas,
    outer: ScreenRect,
    frame: ScreenRect,
    text_height: f32,
    color: Color,
    options: &ShowOptions,
) {
    let mut canvas = StyleScope::new(canvas);
    canvas.text_align(HAlign::Center, VAlign::Center);
    canvas.fill(color);
    canvas.stroke(color);
    if let Some(title) = &options.title {
        let mut canvas = StyleScope::new(&mut *canvas);
        canvas.text_size(TITLE_SIZE);
        canvas.text(title, outer.center().x, outer.min.y + text_height * 0.5);
    }
    if let Some(xlabel) = &options.xlabel {
        canvas.text(xlabel, frame.center().x, outer.max.y - text_height);
    }
    if let Some(ylabel) = &options.ylabel {
        let mut canvas = MatrixScope::new(&mut *canvas);
        canvas.translate(outer.min.x + text_height * 0.5, outer.center().y);
        canvas.rotate(-FRAC_PI_2);
        canvas.text(ylabel, 0.0, 0.0);
    }
}

fn draw_series(
    canvas: &mut dyn Canvas,
    series: &Series,
    x_range: Range,
    data: ScreenRect,
    mapping: &YMapping,
    default_color: Color,
) {
    let transform = x_transform(x_range, data);
    let xs: Vec<f32> = series.xs().iter().map(|x| transform.to_screen(*x)).collect();
    let color = |index: usize| series.color().resolve(index, default_color);
    let mut canvas = StyleScope::new(canvas);

    match series.kind() {
        SeriesKind::VerticalMarker => {
            canvas.stroke_weight(series.stroke_weight());
            for (index, x) in xs.iter().enumerate() {
                canvas.stroke(color(index));
                canvas.line(*x, data.min.y, *x, data.max.y);
            }
        }
        SeriesKind::Line => {
            if xs.len() < 2 {
                return;
            }
            let ys = mapping.map_all(series.ys(), data);
            canvas.stroke_weight(series.stroke_weight());
            for index in 1..xs.len() {
                if let (Some(y0), Some(y1)) = (ys[index - 1], ys[index]) {
                    canvas.stroke(color(index));
                    canvas.line(xs[index - 1], y0, xs[index], y1);
                }
            }
        }
        SeriesKind::Scatter => {
            let ys = mapping.map_all(series.ys(), data);
            let points: Vec<(usize, f32, f32)> = xs
                .iter()
                .zip(ys)
                .enumerate()
                .filter_map(|(index, (x, y))| y.map(|y| (index, *x, y)))
                .collect();
            let diameter = series.diameter();
            let r = diameter * 0.5;
            match series.marker() {
                Marker::Circle => {
                    canvas.no_stroke();
                    for (index, x, y) in points {
                        canvas.fill(color(index));
                        canvas.circle(x, y, diameter);
                    }
                }
                Marker::Square => {
                    canvas.no_stroke();
                    canvas.rect_mode(RectMode::Center);
                    for (index, x, y) in points {
                        canvas.fill(color(index));
                        canvas.rect(x, y, diameter, diameter);
                    }
                }
                Marker::Triangle => {
                    canvas.no_stroke();
                    for (index, x, y) in points {
                        canvas.fill(color(index));
                        canvas.triangle(x - r, y + r, x, y - r, x + r, y + r);
                    }
                }
                Marker::Cross => {
                    canvas.stroke_weight(series.stroke_weight());
                    for (index, x, y) in points {
                        canvas.stroke(color(index));
                        canvas.line(x - r, y - r, x + r, y + r);
                        canvas.line(x - r, y + r, x + r, y - r);
                    }
                }
                Marker::Line => {
                    canvas.stroke_weight(series.stroke_weight());
                    for (index, x, y) in points {
                        canvas.stroke(color(index));
                        canvas.line(x, y - 5.0, x, y + 5.0);
                    }
                }
                Marker::Glyph(glyph) => {
                    canvas.no_stroke();
                    canvas.text_align(HAlign::Center, VAlign::Center);
                    for (index, x, y) in points {
                        canvas.fill(color(index));
                        canvas.text(glyph, x, y);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderCommand;

    fn canvas() -> Surface {
        Surface::headless(800.0, 600.0)
    }

    #[test]
    fn line_points_span_data_area() {
        let mut plot = Plot::new(0.0, 0.0, 500.0, 200.0);
        let mut surface = canvas();
        plot.plot([0.0, 1.0, 2.0], [0.0, 5.0, 10.0], LineOptions::default());
        let layout = plot.show(&mut surface, &ShowOptions::default()).unwrap();

        let lines: Vec<_> = surface.commands().lines().collect();
        let (first, second) = (lines[lines.len() - 2], lines[lines.len() - 1]);
        assert_eq!(first.0.x, layout.data.min.x);
        assert!((first.1.x - layout.data.center().x).abs() < 1e-3);
        assert_eq!(second.1.x, layout.data.max.x);
        assert!(first.0.y > first.1.y);
        assert!(first.1.y > second.1.y);
        assert_eq!(first.0.y, layout.data.max.y);
        assert_eq!(second.1.y, layout.data.min.y);
    }

    #[test]
    fn show_consumes_the_buffer() {
        let mut plot = Plot::new(0.0, 0.0, 500.0, 200.0);
        let mut surface = canvas();
        plot.plot([0.0, 1.0], [1.0, 2.0], LineOptions::default());
        assert!(plot.show(&mut surface, &ShowOptions::default()).is_ok());
        assert!(plot.series().is_empty());

        surface.begin_draw();
        assert_eq!(
            plot.show(&mut surface, &ShowOptions::default()),
            Err(PlotError::Empty)
        );
        assert!(surface.commands().is_empty());
        assert!(plot.last_layout().is_none());
    }

    #[test]
    fn malformed_input_is_ignored() {
        let mut plot = Plot::new(0.0, 0.0, 500.0, 200.0);
        plot.plot([0.0, 1.0], [1.0], LineOptions::default())
            .scatter(Vec::<f64>::new(), Vec::<f64>::new(), ScatterOptions::default())
            .axvline(Vec::<f64>::new(), LineOptions::default());
        assert!(plot.series().is_empty());
    }

    #[test]
    fn mixed_axis_kinds_abort_without_drawing() {
        let mut plot = Plot::new(0.0, 0.0, 500.0, 200.0);
        let mut surface = canvas();
        plot.plot([0.0, 1.0], [1.0, 2.0], LineOptions::default());
        plot.scatter([0.0, 1.0], ["a", "b"], ScatterOptions::default());
        let result = plot.show(&mut surface, &ShowOptions::default());
        assert_eq!(
            result,
            Err(PlotError::MixedAxisKinds {
                axis: YAxis::Primary
            })
        );
        assert!(surface.commands().is_empty());
        assert!(plot.series().is_empty());
    }

    #[test]
    fn axes_may_differ_in_kind() {
        let mut plot = Plot::new(0.0, 0.0, 500.0, 300.0);
        let mut surface = canvas();
        plot.plot([0.0, 1.0], [1.0, 2.0], LineOptions::default());
        plot.scatter(
            [0.0, 1.0],
            ["low", "high"],
            ScatterOptions::default()
                .with_axis(YAxis::Secondary)
                .with_order(["high", "low"]),
        );
        let layout = plot.show(&mut surface, &ShowOptions::default()).unwrap();
        assert!(layout.y_ranges[0].is_some());
        assert!(layout.y_ranges[1].is_none());
        let labels: Vec<&str> = layout.y_ticks[1].iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["low", "high"]);
        assert_eq!(layout.y_ticks[1][1].position, layout.data.min.y);
        assert!(layout.frame.max.x < layout.outer.max.x - 10.0 - 2.0);
    }

    #[test]
    fn vertical_markers_only_get_one_blank_tick() {
        let mut plot = Plot::new(0.0, 0.0, 500.0, 200.0);
        let mut surface = canvas();
        plot.axvline([1.0, 3.0], LineOptions::default().with_color(Color::BLACK));
        let layout = plot.show(&mut surface, &ShowOptions::default()).unwrap();
        assert_eq!(layout.y_ticks[0].len(), 1);
        assert_eq!(layout.y_ticks[0][0].label, "");
        assert_eq!(layout.y_ticks[0][0].position, layout.data.center().y);

        let markers: Vec<_> = surface
            .commands()
            .commands()
            .iter()
            .filter(|command| matches!(command, RenderCommand::Line { color, .. } if *color == Color::BLACK))
            .collect();
        assert_eq!(markers.len(), 2);
    }

    #[test]
    fn ylimit_pins_range_unless_autoscaled() {
        let mut surface = canvas();
        let mut plot = Plot::new(0.0, 0.0, 500.0, 200.0);
        plot.plot([0.0, 1.0, 2.0], [2.0, 8.0, 20.0], LineOptions::default());
        let options = ShowOptions::default().with_ylimit(YAxis::Primary, Some(0.0), Some(10.0));
        let layout = plot.show(&mut surface, &options).unwrap();
        assert_eq!(layout.y_ranges[0], Some(Range::new(0.0, 10.0)));

        plot.plot([0.0, 1.0, 2.0], [2.0, 8.0, 20.0], LineOptions::default());
        let options = options.with_autoscale_in_ylimits(YAxis::Primary, true, true);
        let layout = plot.show(&mut surface, &options).unwrap();
        assert_eq!(layout.y_ranges[0], Some(Range::new(2.0, 10.0)));
    }

    #[test]
    fn labels_reserve_margins() {
        let mut surface = canvas();
        let mut plot = Plot::new(10.0, 20.0, 500.0, 300.0);
        plot.plot([0.0, 1.0], [0.0, 1.0], LineOptions::default());
        let plain = plot.show(&mut surface, &ShowOptions::default()).unwrap();

        plot.plot([0.0, 1.0], [0.0, 1.0], LineOptions::default());
        let options = ShowOptions::default()
            .with_title("Title")
            .with_xlabel("time")
            .with_ylabel("value");
        let labelled = plot.show(&mut surface, &options).unwrap();

        // 14px text: ascent 10.5 + descent 3.5.
        assert_eq!(labelled.frame.min.y, plain.frame.min.y + 14.0);
        assert_eq!(labelled.frame.min.x, plain.frame.min.x + 14.0);
        assert_eq!(labelled.frame.max.y, plain.frame.max.y - 14.0);
        assert_eq!(plain.frame.min.y, 30.0);
        assert!(surface.commands().texts().any(|(_, text)| text == "Title"));
    }

    #[test]
    fn markers_emit_their_primitives() {
        let mut surface = canvas();
        let mut plot = Plot::new(0.0, 0.0, 500.0, 200.0);
        plot.scatter(
            [0.0, 1.0],
            [0.0, 1.0],
            ScatterOptions::default()
                .with_marker(Marker::Cross)
                .with_color(Color::rgb8(255, 0, 0)),
        );
        plot.scatter(
            [0.0, 1.0],
            [0.0, 1.0],
            ScatterOptions::default().with_marker(Marker::Glyph("x".to_string())),
        );
        plot.show(&mut surface, &ShowOptions::default()).unwrap();

        let red = Color::rgb8(255, 0, 0);
        let crosses = surface
            .commands()
            .commands()
            .iter()
            .filter(|command| matches!(command, RenderCommand::Line { color, .. } if *color == red))
            .count();
        assert_eq!(crosses, 4);
        assert_eq!(surface.commands().texts().filter(|(_, t)| *t == "x").count(), 2);
    }

    #[test]
    fn image_mode_draws_at_origin_and_reuses_surface() {
        let host = canvas();
        let mut plot = Plot::new(100.0, 100.0, 300.0, 150.0);
        plot.plot([0.0, 1.0], [0.0, 1.0], LineOptions::default());
        let image = plot.show_to_image(&host, &ShowOptions::default()).unwrap();
        assert!(image.has_size(300.0, 150.0));
        assert!(matches!(
            image.commands().commands().first(),
            Some(RenderCommand::Background(_))
        ));
        assert_eq!(plot.last_layout().map(|l| l.outer.min.x), Some(0.0));

        let skipped = plot.show_to_image(&host, &ShowOptions::default().without_empty_warning());
        assert_eq!(skipped.err(), Some(PlotError::Empty));
        assert_eq!(plot.image().map(|image| image.commands().len()), Some(1));
        assert!(host.commands().is_empty());
    }

    #[test]
    fn mixed_kinds_on_secondary_axis_abort() {
        let mut plot = Plot::new(0.0, 0.0, 500.0, 200.0);
        let mut surface = canvas();
        plot.plot([0.0, 1.0], [1.0, 2.0], LineOptions::default());
        plot.plot(
            [0.0, 1.0],
            [3.0, 4.0],
            LineOptions::default().with_axis(YAxis::Secondary),
        );
        plot.scatter(
            [0.0, 1.0],
            ["a", "b"],
            ScatterOptions::default().with_axis(YAxis::Secondary),
        );
        assert_eq!(
            plot.show(&mut surface, &ShowOptions::default()),
            Err(PlotError::MixedAxisKinds {
                axis: YAxis::Secondary
            })
        );
        assert!(surface.commands().is_empty());
        assert!(plot.series().is_empty());
    }

    #[test]
    fn per_point_colors_reach_primitives() {
        let mut plot = Plot::new(0.0, 0.0, 500.0, 200.0);
        let mut surface = canvas();
        let (red, green) = (Color::rgb8(255, 0, 0), Color::rgb8(0, 255, 0));
        let fallback = plot.theme().series_color;
        plot.scatter(
            [0.0, 1.0, 2.0],
            [0.0, 1.0, 2.0],
            ScatterOptions::default().with_color(vec![red, green]),
        );
        plot.plot(
            [0.0, 1.0, 2.0],
            [2.0, 1.0, 0.0],
            LineOptions::default().with_color(vec![red, green]),
        );
        plot.show(&mut surface, &ShowOptions::default()).unwrap();

        let fills: Vec<_> = surface
            .commands()
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Circle { style, .. } => style.fill,
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![red, green, fallback]);

        // segment i takes the color of its end point
        let segments: Vec<_> = surface
            .commands()
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Line { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(segments[segments.len() - 2..], [green, fallback]);
    }

    #[test]
    fn markers_scale_with_diameter() {
        let mut plot = Plot::new(0.0, 0.0, 500.0, 200.0);
        let mut surface = canvas();
        let red = Color::rgb8(255, 0, 0);
        plot.scatter(
            [0.0, 1.0],
            [0.0, 1.0],
            ScatterOptions::default()
                .with_marker(Marker::Cross)
                .with_diameter(10.0)
                .with_color(red),
        );
        plot.scatter(
            [0.0, 1.0],
            [0.0, 1.0],
            ScatterOptions::default()
                .with_marker(Marker::Triangle)
                .with_diameter(12.0),
        );
        plot.show(&mut surface, &ShowOptions::default()).unwrap();

        for command in surface.commands().commands() {
            match command {
                RenderCommand::Line { start, end, color, .. } if *color == red => {
                    assert!(((end.x - start.x).abs() - 10.0).abs() < 1e-3);
                    assert!(((end.y - start.y).abs() - 10.0).abs() < 1e-3);
                }
                RenderCommand::Triangle { points, .. } => {
                    assert!(((points[2].x - points[0].x) - 12.0).abs() < 1e-3);
                    assert!(((points[0].y - points[1].y) - 12.0).abs() < 1e-3);
                }
                _ => {}
            }
        }
    }
}
