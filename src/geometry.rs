use std::ops::{Add, Sub};

/// Continuous 2D coordinate in grid units (one unit per cell).
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other - self).magnitude()
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn subtract_is_componentwise() {
        let d = Point::new(4.0, 2.5) - Point::new(2.5, 3.0);
        assert_eq!(d, Point::new(1.5, -0.5));
    }

    #[test]
    fn magnitude_is_euclidean() {
        assert_relative_eq!(Point::new(3.0, -4.0).magnitude(), 5.0);
        assert_eq!(Point::default().magnitude(), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(2.0, 3.0);
        assert_relative_eq!(a.distance(b), b.distance(a));
        assert_relative_eq!(a.distance(b), 5f64.sqrt());
    }
}
