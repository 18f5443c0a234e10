//! Planar points and the displacement between them.
//!
//! Screen-space and world-space coordinates share [`Point`]; which space a
//! value lives in is up to the caller.

use core::ops::Sub;

/// A point in the plane.
///
/// # Example
///
/// ```rust
/// use kinematics::Point;
///
/// let d = Point::new(4.0, 6.0) - Point::new(1.0, 2.0);
/// assert_eq!(d.magnitude(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The launch point of every trajectory.
    #[inline]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Returns `true` if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

/// Displacement from one [`Point`] to another.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vector {
    /// Creates a vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction in radians from +x; `0.0` for the zero vector.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difference_of_points() {
        let v = Point::new(5.0, 7.0) - Point::new(1.0, 2.0);
        assert_eq!(v, Vector::new(4.0, 5.0));
    }

    #[test]
    fn test_arrow_direction() {
        let left = Point::new(0.0, 0.0) - Point::new(10.0, 0.0);
        assert!((left.angle() - core::f64::consts::PI).abs() < 1e-12);
        assert_eq!(Vector::default().angle(), 0.0);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::origin().is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }
}
