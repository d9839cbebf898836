//! Coordinate mapping between data values and screen pixels.

/// Linearly map `value` from `[in_low, in_high]` onto `[out_low, out_high]`.
///
/// A degenerate input interval (`in_low == in_high`) maps every value to the
/// midpoint of the output interval instead of dividing by zero.
pub fn remap(value: f64, in_low: f64, in_high: f64, out_low: f64, out_high: f64) -> f64 {
    if in_low == in_high {
        return (out_low + out_high) * 0.5;
    }
    let t = (value - in_low) / (in_high - in_low);
    out_low * (1.0 - t) + out_high * t
}

/// Map every value with [`remap`], preserving order and length.
pub fn remap_all(
    values: &[f64],
    in_low: f64,
    in_high: f64,
    out_low: f64,
    out_high: f64,
) -> Vec<f64> {
    values
        .iter()
        .map(|value| remap(*value, in_low, in_high, out_low, out_high))
        .collect()
}

/// Mapping between one data interval and one pixel interval.
///
/// Vertical axes pass the bottom pixel as `pixel_start` so that larger data
/// values land higher on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    data_low: f64,
    data_high: f64,
    pixel_start: f32,
    pixel_end: f32,
}

impl AxisTransform {
    /// Create a transform for the given data and pixel intervals.
    pub fn new(data_low: f64, data_high: f64, pixel_start: f32, pixel_end: f32) -> Self {
        Self {
            data_low,
            data_high,
            pixel_start,
            pixel_end,
        }
    }

    /// Map a data value into screen space.
    pub fn to_screen(&self, value: f64) -> f32 {
        remap(
            value,
            self.data_low,
            self.data_high,
            self.pixel_start as f64,
            self.pixel_end as f64,
        ) as f32
    }

    /// Map a screen coordinate back into data space.
    pub fn to_data(&self, pixel: f32) -> f64 {
        remap(
            pixel as f64,
            self.pixel_start as f64,
            self.pixel_end as f64,
            self.data_low,
            self.data_high,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_interval_maps_to_midpoint() {
        for value in [-10.0, 0.0, 3.5, 1e9] {
            assert_eq!(remap(value, 2.0, 2.0, 10.0, 30.0), 20.0);
        }
        assert_eq!(remap_all(&[1.0, 2.0], 5.0, 5.0, 0.0, 1.0), vec![0.5, 0.5]);
    }

    #[test]
    fn endpoints_are_exact() {
        let cases = [(0.1, 0.7, 13.3, 431.9), (-5.0, 5.0, 1.0, 0.0), (3.0, 1.0, 0.2, 0.3)];
        for (in_low, in_high, out_low, out_high) in cases {
            assert_eq!(remap(in_low, in_low, in_high, out_low, out_high), out_low);
            assert_eq!(remap(in_high, in_low, in_high, out_low, out_high), out_high);
        }
    }

    #[test]
    fn monotonic_for_increasing_output() {
        let mut last = f64::NEG_INFINITY;
        for step in 0..=100 {
            let value = -3.0 + step as f64 * 0.07;
            let mapped = remap(value, -3.0, 4.0, 20.0, 480.0);
            assert!(mapped >= last);
            last = mapped;
        }
    }

    #[test]
    fn axis_transform_roundtrip() {
        let transform = AxisTransform::new(0.0, 10.0, 200.0, 100.0);
        assert_eq!(transform.to_screen(0.0), 200.0);
        assert_eq!(transform.to_screen(10.0), 100.0);
        let pixel = transform.to_screen(7.5);
        assert!((transform.to_data(pixel) - 7.5).abs() < 1e-4);
    }
}
