//! Geometric primitives in screen space.
//!
//! All coordinates are logical pixels with the origin in the top-left corner
//! and the vertical axis growing downward, matching the host canvas.

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset the point by a delta.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its top-left corner and size.
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ScreenPoint::new(x, y), ScreenPoint::new(x + width, y + height))
    }

    /// Create a rectangle from its center and size.
    pub fn from_center_size(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::from_origin_size(cx - width * 0.5, cy - height * 0.5, width, height)
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center of the rectangle.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Strict containment test; points on the border are outside.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }

    /// Shrink the rectangle by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.min.offset(amount, amount),
            self.max.offset(-amount, -amount),
        )
    }

    /// Translate the rectangle.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.min.offset(dx, dy), self.max.offset(dx, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_strict() {
        let rect = ScreenRect::from_origin_size(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(ScreenPoint::new(15.0, 15.0)));
        assert!(!rect.contains(ScreenPoint::new(10.0, 15.0)));
        assert!(!rect.contains(ScreenPoint::new(15.0, 30.0)));
    }

    #[test]
    fn inset_shrinks_both_sides() {
        let rect = ScreenRect::from_origin_size(0.0, 0.0, 100.0, 50.0).inset(15.0);
        assert_eq!(rect.width(), 70.0);
        assert_eq!(rect.height(), 20.0);
        assert_eq!(rect.center(), ScreenPoint::new(50.0, 25.0));
    }
}
