//! Axis tick generation and label formatting.
//!
//! Tick density is driven by a label budget: the number of ticks is however
//! many measured labels fit into the pixel span without overlapping, so ticks
//! do not land on round numbers.

use std::collections::HashMap;

use crate::range::Limits;
use crate::text::TextMeasurer;
use crate::transform::remap;

/// Number of evenly spaced values substituted when an axis is clipped.
const LIMITED_SAMPLES: usize = 30;

/// Fixed or scientific number notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Plain decimal notation.
    Fixed,
    /// Mantissa and exponent (`1.50e+06`).
    Scientific,
}

/// Label format for numeric axis values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// Digits after the decimal point.
    pub decimals: usize,
    /// Notation.
    pub notation: Notation,
}

impl NumberFormat {
    /// Fixed notation with `decimals` digits.
    pub fn fixed(decimals: usize) -> Self {
        Self {
            decimals,
            notation: Notation::Fixed,
        }
    }

    /// Infer a format from the value spread, unless `decimals` overrides it.
    ///
    /// Narrower spreads get more decimals (`<= 500` one, `<= 50` two, `<= 2`
    /// three, `<= 0.2` four). Spreads below 0.001 or values beyond one million
    /// in magnitude switch to scientific notation with two decimals.
    pub fn infer(min: f64, max: f64, decimals: Option<usize>) -> Self {
        if let Some(decimals) = decimals {
            return Self::fixed(decimals);
        }
        let diff = max - min;
        if diff < 0.001 || max > 1_000_000.0 || min < -1_000_000.0 {
            return Self {
                decimals: 2,
                notation: Notation::Scientific,
            };
        }
        let decimals = if diff <= 0.2 {
            4
        } else if diff <= 2.0 {
            3
        } else if diff <= 50.0 {
            2
        } else if diff <= 500.0 {
            1
        } else {
            0
        };
        Self::fixed(decimals)
    }

    /// Format a value.
    pub fn format(&self, value: f64) -> String {
        match self.notation {
            Notation::Fixed => format!("{value:.*}", self.decimals),
            Notation::Scientific => {
                let raw = format!("{value:.*e}", self.decimals);
                match raw.split_once('e') {
                    Some((mantissa, exponent)) => {
                        let exponent: i32 = exponent.parse().unwrap_or(0);
                        let sign = if exponent < 0 { '-' } else { '+' };
                        format!("{mantissa}e{sign}{:02}", exponent.abs())
                    }
                    None => raw,
                }
            }
        }
    }
}

/// A labeled position along an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel coordinate along the axis.
    pub position: f32,
    /// Label text.
    pub label: String,
}

impl Tick {
    fn new(position: f32, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// Pixel span of an axis.
///
/// Vertical spans are given top to bottom; tick placement swaps them so that
/// larger values land higher on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpan {
    start: f32,
    end: f32,
    horizontal: bool,
}

impl AxisSpan {
    /// Horizontal span from `left` to `right`.
    pub fn horizontal(left: f32, right: f32) -> Self {
        Self {
            start: left,
            end: right,
            horizontal: true,
        }
    }

    /// Vertical span from `top` to `bottom`.
    pub fn vertical(top: f32, bottom: f32) -> Self {
        Self {
            start: top,
            end: bottom,
            horizontal: false,
        }
    }

    /// Check whether the span is horizontal.
    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    /// Endpoints in value order: smallest value first.
    pub fn oriented(&self) -> (f32, f32) {
        if self.horizontal {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }
}

/// Options for [`numeric_ticks`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericTickOptions {
    /// Label font size.
    pub text_size: f32,
    /// Fixed decimal override.
    pub decimals: Option<usize>,
    /// Clip values replacing the data minimum and maximum.
    pub limits: Limits,
}

/// Ticks for numeric values.
///
/// Values are deduplicated. When fewer unique values exist than labels fit,
/// each value gets its own tick at its mapped position (a single value sits
/// at the span midpoint). Otherwise the span is divided evenly and each tick
/// is labeled with the value that maps to it.
pub fn numeric_ticks<M: TextMeasurer + ?Sized>(
    measurer: &M,
    values: &[f64],
    span: AxisSpan,
    options: NumericTickOptions,
) -> Vec<Tick> {
    let mut unique: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    unique.sort_by(f64::total_cmp);
    unique.dedup();
    let (Some(&first), Some(&last)) = (unique.first(), unique.last()) else {
        return Vec::new();
    };

    let min = options.limits.low.unwrap_or(first);
    let max = options.limits.high.unwrap_or(last);
    if options.limits.is_set() {
        unique = (0..LIMITED_SAMPLES)
            .map(|i| remap(i as f64, 0.0, (LIMITED_SAMPLES - 1) as f64, min, max))
            .collect();
    }

    let format = NumberFormat::infer(min, max, options.decimals);
    let (start, end) = span.oriented();

    if unique.len() == 1 {
        return vec![Tick::new((start + end) * 0.5, format.format(unique[0]))];
    }

    let widest = if max > min.abs() { max } else { min };
    let label_extent = if span.is_horizontal() {
        measurer.text_width(&format.format(widest), options.text_size) * 1.5
    } else {
        measurer.text_ascent(options.text_size) * 2.5
    };
    let budget = if label_extent > 0.0 {
        ((end - start).abs() / label_extent) as usize
    } else {
        usize::MAX
    };

    if unique.len() < budget {
        unique
            .iter()
            .map(|value| {
                let position = remap(*value, min, max, start as f64, end as f64) as f32;
                Tick::new(position, format.format(*value))
            })
            .collect()
    } else {
        linspace(start, end, budget)
            .into_iter()
            .map(|position| {
                let value = remap(position as f64, start as f64, end as f64, min, max);
                Tick::new(position, format.format(value))
            })
            .collect()
    }
}

/// Ticks for categorical values plus the category to pixel lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoricalTicks {
    /// Ticks in placement order.
    pub ticks: Vec<Tick>,
    lookup: HashMap<String, f32>,
}

impl CategoricalTicks {
    /// Pixel position of `category`.
    pub fn position(&self, category: &str) -> Option<f32> {
        self.lookup.get(category).copied()
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Check whether there are no categories.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

/// Evenly distribute the unique `labels` across `span`.
///
/// Categories keep their first-appearance order unless `order` is given;
/// categories missing from `order` follow the ordered ones. On vertical axes
/// the order reads top to bottom. A single category sits at the midpoint.
pub fn categorical_ticks<S: AsRef<str>>(
    labels: &[S],
    span: AxisSpan,
    order: Option<&[String]>,
) -> CategoricalTicks {
    let mut categories: Vec<&str> = Vec::new();
    if let Some(order) = order {
        for category in order {
            if !categories.contains(&category.as_str()) {
                categories.push(category.as_str());
            }
        }
    }
    let explicit = categories.len();
    for label in labels {
        if !categories.contains(&label.as_ref()) {
            categories.push(label.as_ref());
        }
    }
    if explicit > 0 && !span.is_horizontal() {
        categories.reverse();
    }

    let (start, end) = span.oriented();
    let positions = if categories.len() == 1 {
        vec![(start + end) * 0.5]
    } else {
        linspace(start, end, categories.len())
    };

    let mut result = CategoricalTicks::default();
    for (category, position) in categories.into_iter().zip(positions) {
        result.lookup.insert(category.to_string(), position);
        result.ticks.push(Tick::new(position, category));
    }
    result
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f32, end: f32, count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..count)
            .map(|i| {
                remap(
                    i as f64,
                    0.0,
                    (count - 1) as f64,
                    start as f64,
                    end as f64,
                ) as f32
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonospaceMetrics;

    fn options() -> NumericTickOptions {
        NumericTickOptions {
            text_size: 14.0,
            ..NumericTickOptions::default()
        }
    }

    #[test]
    fn decimals_follow_breakpoints() {
        let cases = [
            (0.0, 1000.0, 0),
            (0.0, 500.0, 1),
            (0.0, 50.0, 2),
            (0.0, 2.0, 3),
            (0.0, 0.2, 4),
            (0.0, 0.01, 4),
        ];
        for (min, max, decimals) in cases {
            assert_eq!(NumberFormat::infer(min, max, None), NumberFormat::fixed(decimals));
        }
        let mut last = usize::MAX;
        for step in 0..200 {
            let spread = 0.001 + step as f64 * 5.0;
            let format = NumberFormat::infer(0.0, spread, None);
            assert!(format.decimals <= last);
            last = format.decimals;
        }
    }

    #[test]
    fn scientific_for_tiny_spread_or_huge_values() {
        for (min, max) in [(1.0, 1.0005), (0.0, 2_000_000.0), (-3_000_000.0, 0.0)] {
            assert_eq!(
                NumberFormat::infer(min, max, None).notation,
                Notation::Scientific
            );
        }
        assert_eq!(NumberFormat::infer(0.0, 2e6, Some(1)), NumberFormat::fixed(1));
    }

    #[test]
    fn scientific_format_uses_signed_exponent() {
        let format = NumberFormat {
            decimals: 2,
            notation: Notation::Scientific,
        };
        assert_eq!(format.format(1_500_000.0), "1.50e+06");
        assert_eq!(format.format(0.00042), "4.20e-04");
        assert_eq!(NumberFormat::fixed(1).format(2.26), "2.3");
    }

    #[test]
    fn single_value_sits_at_midpoint() {
        let metrics = MonospaceMetrics::default();
        for span in [AxisSpan::horizontal(10.0, 110.0), AxisSpan::vertical(10.0, 110.0)] {
            let ticks = numeric_ticks(&metrics, &[4.0, 4.0, 4.0], span, options());
            assert_eq!(ticks.len(), 1);
            assert_eq!(ticks[0].position, 60.0);
        }
    }

    #[test]
    fn few_values_get_one_tick_each() {
        let metrics = MonospaceMetrics::default();
        let ticks = numeric_ticks(
            &metrics,
            &[2.0, 0.0, 1.0, 2.0],
            AxisSpan::horizontal(0.0, 400.0),
            options(),
        );
        let positions: Vec<f32> = ticks.iter().map(|tick| tick.position).collect();
        assert_eq!(positions, vec![0.0, 200.0, 400.0]);
        assert_eq!(ticks[0].label, "0.000");
    }

    #[test]
    fn dense_values_follow_label_budget() {
        let metrics = MonospaceMetrics::default();
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        // "100.0" at 14px is 35px wide, 52.5px with padding: seven labels fit.
        let ticks = numeric_ticks(&metrics, &values, AxisSpan::horizontal(0.0, 400.0), options());
        assert_eq!(ticks.len(), 7);
        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("0.0"));
        assert_eq!(ticks.last().map(|t| t.label.as_str()), Some("100.0"));
    }

    #[test]
    fn vertical_axis_puts_small_values_at_bottom() {
        let metrics = MonospaceMetrics::default();
        let ticks = numeric_ticks(
            &metrics,
            &[0.0, 10.0],
            AxisSpan::vertical(0.0, 200.0),
            options(),
        );
        assert_eq!(ticks[0].position, 200.0);
        assert_eq!(ticks[1].position, 0.0);
    }

    #[test]
    fn limits_replace_data_extent() {
        let metrics = MonospaceMetrics::default();
        let ticks = numeric_ticks(
            &metrics,
            &[3.0, 4.0],
            AxisSpan::vertical(0.0, 100.0),
            NumericTickOptions {
                limits: Limits::new(Some(0.0), Some(10.0)),
                ..options()
            },
        );
        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("0.00"));
        assert_eq!(ticks.last().map(|t| t.label.as_str()), Some("10.00"));
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let labels = ["b", "a", "b", "c"];
        let ticks = categorical_ticks(&labels, AxisSpan::horizontal(0.0, 100.0), None);
        let names: Vec<&str> = ticks.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(ticks.position("a"), Some(50.0));
    }

    #[test]
    fn ordered_categories_read_top_down() {
        let order = vec!["high".to_string(), "low".to_string()];
        let labels = ["low", "mid", "high"];
        let ticks = categorical_ticks(&labels, AxisSpan::vertical(0.0, 100.0), Some(order.as_slice()));
        assert_eq!(ticks.position("high"), Some(0.0));
        assert_eq!(ticks.position("low"), Some(50.0));
        assert_eq!(ticks.position("mid"), Some(100.0));
    }

    #[test]
    fn single_category_sits_at_midpoint() {
        let ticks = categorical_ticks(&["only"], AxisSpan::vertical(20.0, 40.0), None);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks.position("only"), Some(30.0));
    }
}
