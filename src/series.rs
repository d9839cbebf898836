//! Chart series and their styling.

use crate::render::Color;

/// Which y axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YAxis {
    /// Left axis.
    #[default]
    Primary,
    /// Right axis.
    Secondary,
}

impl YAxis {
    /// Axis index (0 for primary, 1 for secondary).
    pub fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }
}

impl std::fmt::Display for YAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Secondary => f.write_str("secondary"),
        }
    }
}

/// Series rendering kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Connected line segments.
    Line,
    /// One marker per point.
    Scatter,
    /// Full-height vertical line per x value.
    VerticalMarker,
}

/// Y data of a series.
#[derive(Debug, Clone, PartialEq)]
pub enum YValues {
    /// Numeric values.
    Numeric(Vec<f64>),
    /// Category labels.
    Categorical(Vec<String>),
    /// No y data (vertical markers).
    None,
}

impl YValues {
    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Categorical(values) => values.len(),
            Self::None => 0,
        }
    }

    /// Check whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether the values are categories.
    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical(_))
    }
}

impl From<Vec<f64>> for YValues {
    fn from(values: Vec<f64>) -> Self {
        Self::Numeric(values)
    }
}

impl From<&[f64]> for YValues {
    fn from(values: &[f64]) -> Self {
        Self::Numeric(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for YValues {
    fn from(values: [f64; N]) -> Self {
        Self::Numeric(values.to_vec())
    }
}

impl From<Vec<String>> for YValues {
    fn from(values: Vec<String>) -> Self {
        Self::Categorical(values)
    }
}

impl From<&[&str]> for YValues {
    fn from(values: &[&str]) -> Self {
        Self::Categorical(values.iter().map(|value| value.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for YValues {
    fn from(values: [&str; N]) -> Self {
        Self::Categorical(values.iter().map(|value| value.to_string()).collect())
    }
}

/// Color of a series, resolved once when the series is appended.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SeriesColor {
    /// Use the theme's series color.
    #[default]
    Default,
    /// One color for every point.
    Uniform(Color),
    /// One color per point.
    PerPoint(Vec<Color>),
}

impl SeriesColor {
    /// Color of point `index`, falling back to `default`.
    pub fn resolve(&self, index: usize, default: Color) -> Color {
        match self {
            Self::Default => default,
            Self::Uniform(color) => *color,
            Self::PerPoint(colors) => colors.get(index).copied().unwrap_or(default),
        }
    }
}

impl From<Color> for SeriesColor {
    fn from(color: Color) -> Self {
        Self::Uniform(color)
    }
}

impl From<Vec<Color>> for SeriesColor {
    fn from(colors: Vec<Color>) -> Self {
        Self::PerPoint(colors)
    }
}

/// Scatter marker shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Marker {
    /// Filled circle of the series diameter.
    #[default]
    Circle,
    /// Two diagonal strokes.
    Cross,
    /// Filled square of the series diameter.
    Square,
    /// Small filled triangle.
    Triangle,
    /// Short vertical stroke.
    Line,
    /// Custom text drawn centered on the point.
    Glyph(String),
}

/// Styling for line and vertical marker series.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOptions {
    /// Series color.
    pub color: SeriesColor,
    /// Stroke width.
    pub stroke_weight: f32,
    /// Target axis.
    pub axis: YAxis,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            color: SeriesColor::Default,
            stroke_weight: 1.0,
            axis: YAxis::Primary,
        }
    }
}

impl LineOptions {
    /// Set the color.
    pub fn with_color(mut self, color: impl Into<SeriesColor>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the stroke width.
    pub fn with_stroke_weight(mut self, weight: f32) -> Self {
        self.stroke_weight = weight;
        self
    }

    /// Plot against the given axis.
    pub fn with_axis(mut self, axis: YAxis) -> Self {
        self.axis = axis;
        self
    }
}

/// Styling for scatter series.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterOptions {
    /// Series color.
    pub color: SeriesColor,
    /// Marker size.
    pub diameter: f32,
    /// Marker shape.
    pub marker: Marker,
    /// Stroke width for stroked markers.
    pub stroke_weight: f32,
    /// Category order, top to bottom.
    pub order: Option<Vec<String>>,
    /// Target axis.
    pub axis: YAxis,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            color: SeriesColor::Default,
            diameter: 7.0,
            marker: Marker::Circle,
            stroke_weight: 1.0,
            order: None,
            axis: YAxis::Primary,
        }
    }
}

impl ScatterOptions {
    /// Set the color.
    pub fn with_color(mut self, color: impl Into<SeriesColor>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the marker size.
    pub fn with_diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter;
        self
    }

    /// Set the marker shape.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    /// Set the stroke width.
    pub fn with_stroke_weight(mut self, weight: f32) -> Self {
        self.stroke_weight = weight;
        self
    }

    /// Set the category order.
    pub fn with_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    /// Plot against the given axis.
    pub fn with_axis(mut self, axis: YAxis) -> Self {
        self.axis = axis;
        self
    }
}

/// One data sequence queued for the next render.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    kind: SeriesKind,
    xs: Vec<f64>,
    ys: YValues,
    color: SeriesColor,
    stroke_weight: f32,
    diameter: f32,
    marker: Marker,
    order: Option<Vec<String>>,
    axis: YAxis,
}

impl Series {
    /// Line series. Returns `None` for empty or unequal-length input.
    pub fn line(xs: Vec<f64>, ys: YValues, options: LineOptions) -> Option<Self> {
        if xs.is_empty() || xs.len() != ys.len() {
            return None;
        }
        Some(Self {
            kind: SeriesKind::Line,
            xs,
            ys,
            color: options.color,
            stroke_weight: options.stroke_weight,
            diameter: 0.0,
            marker: Marker::default(),
            order: None,
            axis: options.axis,
        })
    }

    /// Scatter series. Returns `None` for empty or unequal-length input.
    pub fn scatter(xs: Vec<f64>, ys: YValues, options: ScatterOptions) -> Option<Self> {
        if xs.is_empty() || xs.len() != ys.len() {
            return None;
        }
        Some(Self {
            kind: SeriesKind::Scatter,
            xs,
            ys,
            color: options.color,
            stroke_weight: options.stroke_weight,
            diameter: options.diameter,
            marker: options.marker,
            order: options.order,
            axis: options.axis,
        })
    }

    /// Vertical markers. Returns `None` for empty input.
    pub fn vertical_markers(xs: Vec<f64>, options: LineOptions) -> Option<Self> {
        if xs.is_empty() {
            return None;
        }
        Some(Self {
            kind: SeriesKind::VerticalMarker,
            xs,
            ys: YValues::None,
            color: options.color,
            stroke_weight: options.stroke_weight,
            diameter: 0.0,
            marker: Marker::default(),
            order: None,
            axis: options.axis,
        })
    }

    /// Rendering kind.
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// X values.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y values.
    pub fn ys(&self) -> &YValues {
        &self.ys
    }

    pub(crate) fn ys_mut(&mut self) -> &mut YValues {
        &mut self.ys
    }

    /// Series color.
    pub fn color(&self) -> &SeriesColor {
        &self.color
    }

    /// Stroke width.
    pub fn stroke_weight(&self) -> f32 {
        self.stroke_weight
    }

    /// Marker size.
    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    /// Marker shape.
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Category order.
    pub fn order(&self) -> Option<&[String]> {
        self.order.as_deref()
    }

    /// Target axis.
    pub fn axis(&self) -> YAxis {
        self.axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_is_rejected() {
        assert!(Series::line(vec![], YValues::Numeric(vec![]), LineOptions::default()).is_none());
        assert!(Series::line(vec![1.0, 2.0], [1.0].into(), LineOptions::default()).is_none());
        assert!(Series::vertical_markers(vec![], LineOptions::default()).is_none());
        assert!(Series::scatter(vec![1.0], ["a"].into(), ScatterOptions::default()).is_some());
    }

    #[test]
    fn per_point_colors_fall_back_to_default() {
        let color = SeriesColor::from(vec![Color::BLACK]);
        assert_eq!(color.resolve(0, Color::WHITE), Color::BLACK);
        assert_eq!(color.resolve(3, Color::WHITE), Color::WHITE);
        assert_eq!(SeriesColor::Default.resolve(0, Color::WHITE), Color::WHITE);
    }

    #[test]
    fn scatter_order_collects_strings() {
        let options = ScatterOptions::default().with_order(["b", "a"]);
        assert_eq!(options.order, Some(vec!["b".to_string(), "a".to_string()]));
    }
}
