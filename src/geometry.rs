/// A point in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    /// Top-left corner of the document
    pub const ORIGIN: PointF = PointF { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset this point by the given deltas
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An axis-aligned rectangle in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a rectangle from its top-left corner and size
    pub fn from_origin_size(origin: PointF, width: f32, height: f32) -> Self {
        Self::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Check whether a point lies inside (right/bottom edges exclusive)
    pub fn contains(&self, point: PointF) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_size() {
        let rect = RectF::from_origin_size(PointF::new(10.0, 20.0), 30.0, 40.0);
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 40.0);
        assert!(!rect.is_empty());
    }

    #[test]
    fn test_empty_rect() {
        assert!(RectF::new(5.0, 5.0, 5.0, 10.0).is_empty());
        assert!(RectF::default().is_empty());
    }

    #[test]
    fn test_contains() {
        let rect = RectF::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(PointF::ORIGIN));
        assert!(rect.contains(PointF::new(9.5, 9.5)));
        assert!(!rect.contains(PointF::new(10.0, 5.0)));
    }
}
