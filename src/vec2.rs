// Copyright 2018 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simple 2D vector.

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::common::DIRECTION_EPSILON;
use crate::Point;

/// A 2D vector.
///
/// This is intended primarily for a vector in the mathematical sense,
/// but it can be interpreted as a translation, and converted to and
/// from a point (vector relative to the origin).
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    /// The x-coordinate.
    pub x: f32,
    /// The y-coordinate.
    pub y: f32,
}

impl Vec2 {
    /// The vector (0, 0).
    pub const ZERO: Vec2 = Vec2::new(0., 0.);

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    /// Convert this vector into a `Point`.
    #[inline]
    pub const fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Magnitude of vector.
    #[inline]
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Angle of vector.
    ///
    /// If the vector is interpreted as a complex number, this is the argument.
    /// The angle is expressed in radians.
    #[inline]
    pub fn atan2(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Angle of a chord ending at `end`, or 0 if the chord is too short.
    ///
    /// "Too short" is relative to the magnitude of `end`, see
    /// [`DIRECTION_EPSILON`].
    #[inline]
    pub fn direction_to(self, end: Point) -> f32 {
        let scale = (end.x.abs() + end.y.abs()) * DIRECTION_EPSILON;
        if self.hypot() > scale {
            self.atan2()
        } else {
            0.0
        }
    }

    /// Linearly interpolate between two vectors.
    #[inline]
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        self + t * (other - self)
    }

    /// Is this vector finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Vec2 {
    #[inline]
    fn from(v: (f32, f32)) -> Vec2 {
        Vec2 { x: v.0, y: v.1 }
    }
}

impl From<Vec2> for (f32, f32) {
    #[inline]
    fn from(v: Vec2) -> (f32, f32) {
        (v.x, v.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    #[inline]
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Vec2) {
        *self = Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Vec2) {
        *self = Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, other: f32) -> Vec2 {
        Vec2 {
            x: self.x * other,
            y: self.y * other,
        }
    }
}

impl MulAssign<f32> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, other: f32) {
        *self = Vec2 {
            x: self.x * other,
            y: self.y * other,
        };
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    #[inline]
    fn mul(self, other: Vec2) -> Vec2 {
        other * self
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    // The spline coefficients are divided by arc-length differences; a true
    // division keeps them bit-compatible with the per-component formulas.
    #[inline]
    fn div(self, other: f32) -> Vec2 {
        Vec2 {
            x: self.x / other,
            y: self.y / other,
        }
    }
}

impl DivAssign<f32> for Vec2 {
    #[inline]
    fn div_assign(&mut self, other: f32) {
        *self = *self / other;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    #[inline]
    fn neg(self) -> Vec2 {
        Vec2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ">")
    }
}

#[cfg(feature = "mint")]
impl From<Vec2> for mint::Vector2<f32> {
    #[inline]
    fn from(p: Vec2) -> mint::Vector2<f32> {
        mint::Vector2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Vector2<f32>> for Vec2 {
    #[inline]
    fn from(p: mint::Vector2<f32>) -> Vec2 {
        Vec2 { x: p.x, y: p.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let v = Vec2::new(1.2332421, 532.10721);
        let s = format!("{:.2}", v);
        assert_eq!(s.as_str(), "<1.23, 532.11>");
    }

    #[test]
    fn direction_of_short_chord_is_zero() {
        let end = Point::new(1000.0, 1000.0);
        assert_eq!(Vec2::new(0.0, 0.001).direction_to(end), 0.0);
        let d = Vec2::new(0.0, 1.0).direction_to(end);
        assert!((d - core::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn lerp_and_finite() {
        let v = Vec2::new(2.0, -4.0).lerp(Vec2::new(4.0, 0.0), 0.25);
        assert_eq!(v, Vec2::new(2.5, -3.0));
        assert!(v.is_finite());
        assert!(!Vec2::new(f32::INFINITY, 0.0).is_finite());
        assert!(!(Vec2::new(0.0, 1.0) * f32::NAN).is_finite());
    }
}
