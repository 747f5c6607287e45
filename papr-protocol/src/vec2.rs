//! 2D vector value type
//!
//! Positions and orientations in scene documents are plain pairs of
//! floating-point coordinates in surface pixels, y pointing down.

use core::ops::{Add, Mul, Neg, Sub};

/// Magnitude below which a direction is treated as degenerate
pub const DEGENERATE_LENGTH: f64 = 1e-6;

/// A 2D point or direction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The unit X direction, also the fallback for degenerate directions
    pub const UNIT_X: Vec2 = Vec2::new(1.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length
    pub fn length(self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y)
    }

    /// Unit vector in the same direction
    ///
    /// Vectors with a length at or below [`DEGENERATE_LENGTH`] map to
    /// [`Vec2::UNIT_X`].
    pub fn normalize(self) -> Self {
        let m = self.length();
        if m <= DEGENERATE_LENGTH {
            return Self::UNIT_X;
        }
        Self::new(self.x / m, self.y / m)
    }

    /// Rotate 90° counter-clockwise: `(-y, x)`
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Point on the circle of `radius` around `self` at `angle` radians
    pub fn polar(self, radius: f64, angle: f64) -> Self {
        Self::new(
            self.x + libm::cos(angle) * radius,
            self.y + libm::sin(angle) * radius,
        )
    }

    /// Midpoint between `self` and `other`
    pub fn midpoint(self, other: Self) -> Self {
        (self + other) * 0.5
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_zero_is_unit_x() {
        assert_eq!(Vec2::new(0.0, 0.0).normalize(), Vec2::UNIT_X);
        assert_eq!(Vec2::new(1e-7, -1e-7).normalize(), Vec2::UNIT_X);
    }

    #[test]
    fn test_normalize_axis() {
        assert_eq!(Vec2::new(0.0, -5.0).normalize(), Vec2::new(0.0, -1.0));
        assert_eq!(Vec2::new(3.0, 4.0).normalize(), Vec2::new(0.6, 0.8));
    }

    #[test]
    fn test_perp_rotates_ccw() {
        assert_eq!(Vec2::new(1.0, 0.0).perp(), Vec2::new(0.0, 1.0));
        assert_eq!(Vec2::new(0.0, 1.0).perp(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_polar() {
        let p = Vec2::new(10.0, 10.0).polar(5.0, 0.0);
        assert_eq!(p, Vec2::new(15.0, 10.0));
    }

    proptest! {
        #[test]
        fn prop_normalize_is_unit(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            prop_assume!(Vec2::new(x, y).length() > DEGENERATE_LENGTH);
            let n = Vec2::new(x, y).normalize();
            prop_assert!((n.length() - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_perp_twice_negates(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            let v = Vec2::new(x, y);
            prop_assert_eq!(v.perp().perp(), -v);
        }
    }
}
