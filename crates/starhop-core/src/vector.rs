use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;

/// Point or displacement on the navigation plane.
///
/// The plane is normalized to `[0, 100] × [0, 100]` with `y` growing
/// downward, matching screen layout percentages.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn from_tuple((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Clamp each axis independently into `[min, max]`.
    /// NaN components collapse to `min` so a position is never NaN.
    pub fn clamp(self, min: f64, max: f64) -> Self {
        let axis = |v: f64| if v.is_nan() { min } else { v.clamp(min, max) };
        Self {
            x: axis(self.x),
            y: axis(self.y),
        }
    }

    /// Unit vector the craft's nose points along for a heading in degrees.
    /// 0° points up the screen (negative y), 90° points right.
    pub fn from_heading(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self {
            x: radians.sin(),
            y: -radians.cos(),
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_and_distance() {
        assert_relative_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
        assert_relative_eq!(Vec2::new(1.0, 1.0).distance(Vec2::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn test_clamp_per_axis() {
        let v = Vec2::new(-3.0, 140.0).clamp(0.0, 100.0);
        assert_eq!(v, Vec2::new(0.0, 100.0));

        let inside = Vec2::new(42.0, 7.5).clamp(0.0, 100.0);
        assert_eq!(inside, Vec2::new(42.0, 7.5));
    }

    #[test]
    fn test_clamp_nan_collapses_to_min() {
        let v = Vec2::new(f64::NAN, 50.0).clamp(0.0, 100.0);
        assert_eq!(v, Vec2::new(0.0, 50.0));
    }

    #[test]
    fn test_heading_zero_points_up() {
        let up = Vec2::from_heading(0.0);
        assert_eq!(up, Vec2::new(0.0, -1.0));

        let right = Vec2::from_heading(90.0);
        assert_relative_eq!(right.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(right.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(0.5, -1.0);
        assert_eq!(a + b, Vec2::new(1.5, 1.0));
        assert_eq!(a - b, Vec2::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
    }
}
