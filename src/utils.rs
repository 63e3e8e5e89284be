use glam::DVec2;

/// A point in view-local or screen coordinates
pub type Point = DVec2;

/// Axis-aligned rectangle in view-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: DVec2,
}

impl Rect {
    pub const ZERO: Rect = Rect { origin: DVec2::ZERO, size: DVec2::ZERO };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    /// Rect anchored at the origin, as reported by a window's inner size
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    pub fn center(&self) -> Point {
        self.origin + self.size * 0.5
    }

    /// Zero-area or non-finite rects have no meaningful center to warp to
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
            || !self.origin.is_finite()
            || !self.size.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_of_offset_rect() {
        let r = Rect::new(10.0, 20.0, 800.0, 600.0);
        assert_eq!(r.center(), DVec2::new(410.0, 320.0));
    }

    #[test]
    fn test_degenerate_rects() {
        assert!(Rect::ZERO.is_degenerate());
        assert!(Rect::from_size(800.0, 0.0).is_degenerate());
        assert!(Rect::from_size(-5.0, 10.0).is_degenerate());
        assert!(Rect::from_size(f64::NAN, 10.0).is_degenerate());
        assert!(Rect::new(f64::INFINITY, 0.0, 10.0, 10.0).is_degenerate());
        assert!(!Rect::from_size(1.0, 1.0).is_degenerate());
    }
}
