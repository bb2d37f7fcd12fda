//! Display-space rectangles.

use crate::model::Point;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Distance from the container's left edge.
    pub left: f64,
    /// Distance from the container's top edge.
    pub top: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Square of side `size` centred on `center`.
    #[must_use]
    pub fn centered(center: Point, size: f64) -> Self {
        Self {
            left: center.x - size / 2.0,
            top: center.y - size / 2.0,
            width: size,
            height: size,
        }
    }

    /// Same rectangle shifted by `delta` on both axes.
    #[must_use]
    pub fn offset(self, delta: f64) -> Self {
        Self {
            left: self.left + delta,
            top: self.top + delta,
            ..self
        }
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Returns `true` if `point` lies inside or on the edge.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_square_has_point_at_center() {
        let rect = Rect::centered(Point::new(10.0, 20.0), 8.0);
        let expected = Rect {
            left: 6.0,
            top: 16.0,
            width: 8.0,
            height: 8.0,
        };
        assert_eq!(rect, expected);
        assert_eq!(rect.center(), Point::new(10.0, 20.0));
    }

    #[test]
    fn contains_includes_edges() {
        let rect = Rect {
            left: 0.0,
            top: 0.0,
            width: 10.0,
            height: 5.0,
        };
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(10.0, 5.0)));
        assert!(!rect.contains(Point::new(10.1, 2.0)));
        assert!(!rect.contains(Point::new(5.0, -0.1)));
    }
}
