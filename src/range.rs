//! Closed numeric ranges used for data extents.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Smallest range covering every finite value, or `None` if there is none.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut range: Option<Self> = None;
        for value in values {
            if !value.is_finite() {
                continue;
            }
            match range.as_mut() {
                Some(existing) => existing.expand_to_include(value),
                None => range = Some(Self::new(value, value)),
            }
        }
        range
    }

    /// Midpoint of the range.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Optional lower and upper clip values for an axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Limits {
    /// Lower clip value.
    pub low: Option<f64>,
    /// Upper clip value.
    pub high: Option<f64>,
}

impl Limits {
    /// No clipping.
    pub const NONE: Self = Self {
        low: None,
        high: None,
    };

    /// Clip on both sides.
    pub fn new(low: Option<f64>, high: Option<f64>) -> Self {
        Self { low, high }
    }

    /// Check whether any side clips.
    pub fn is_set(&self) -> bool {
        self.low.is_some() || self.high.is_some()
    }

    /// Clip `value` into the limits.
    pub fn clip(&self, value: f64) -> f64 {
        let value = match self.low {
            Some(low) => value.max(low),
            None => value,
        };
        match self.high {
            Some(high) => value.min(high),
            None => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_skips_non_finite() {
        let range = Range::from_values([3.0, f64::NAN, -2.0, 8.0, f64::INFINITY]).unwrap();
        assert_eq!(range, Range::new(-2.0, 8.0));
        assert!(Range::from_values([f64::NAN]).is_none());
    }

    #[test]
    fn new_orders_bounds() {
        let range = Range::new(5.0, 1.0);
        assert_eq!(range.min, 1.0);
        assert_eq!(range.max, 5.0);
        assert_eq!(range.midpoint(), 3.0);
    }

    #[test]
    fn limits_clip_one_side() {
        let limits = Limits::new(Some(-7.0), None);
        assert_eq!(limits.clip(-10.0), -7.0);
        assert_eq!(limits.clip(100.0), 100.0);
        assert!(!Limits::NONE.is_set());
    }
}
