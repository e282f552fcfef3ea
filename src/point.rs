// Copyright 2018 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D point.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::Vec2;

/// A 2D point in the (already projected) plane the pipe works in.
///
/// Points carry no identity beyond their coordinates.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The x coordinate.
    pub x: f32,
    /// The y coordinate.
    pub y: f32,
}

impl Point {
    /// The point (0, 0).
    pub const ZERO: Point = Point::new(0., 0.);

    /// Create a new `Point` with the provided `x` and `y` coordinates.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Convert this point into a `Vec2`.
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        self.to_vec2().lerp(other.to_vec2(), t).to_point()
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (self - other).hypot()
    }

    /// Is this point finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Compare if two points are within `accuracy` of each other.
    pub fn is_near(self, other: Point, accuracy: f32) -> bool {
        if !self.is_finite() || !other.is_finite() {
            return self == other;
        }
        self.distance(other) <= accuracy
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from(v: (f32, f32)) -> Point {
        Point { x: v.0, y: v.1 }
    }
}

impl From<Point> for (f32, f32) {
    #[inline]
    fn from(v: Point) -> (f32, f32) {
        (v.x, v.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Vec2) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign<Vec2> for Point {
    #[inline]
    fn add_assign(&mut self, other: Vec2) {
        *self = Point::new(self.x + other.x, self.y + other.y);
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Vec2) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign<Vec2> for Point {
    #[inline]
    fn sub_assign(&mut self, other: Vec2) {
        *self = Point::new(self.x - other.x, self.y - other.y);
    }
}

impl Sub<Point> for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ")")
    }
}

#[cfg(feature = "mint")]
impl From<Point> for mint::Point2<f32> {
    #[inline]
    fn from(p: Point) -> mint::Point2<f32> {
        mint::Point2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Point2<f32>> for Point {
    #[inline]
    fn from(p: mint::Point2<f32>) -> Point {
        Point { x: p.x, y: p.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        assert_eq!(
            Point::new(0., 0.) - Vec2::new(10., 0.),
            Point::new(-10., 0.)
        );
        assert_eq!(
            Point::new(0., 0.) - Point::new(-5., 101.),
            Vec2::new(5., -101.)
        );
    }

    #[test]
    fn distance() {
        let p1 = Point::new(0., 10.);
        let p2 = Point::new(0., 5.);
        assert_eq!(p1.distance(p2), 5.);

        let p1 = Point::new(-11., 1.);
        let p2 = Point::new(-7., -2.);
        assert_eq!(p1.distance(p2), 5.);
    }

    #[test]
    fn lerp() {
        let p = Point::new(0., 10.).lerp(Point::new(10., 0.), 0.5);
        assert_eq!(p, Point::new(5., 5.));
    }

    #[test]
    fn display() {
        let p = Point::new(0.125, 9.875);
        assert_eq!(format!("{}", p), "(0.125, 9.875)");
        assert_eq!(format!("{:.1}", p), "(0.1, 9.9)");
    }

    #[test]
    fn near() {
        assert!(Point::new(0., 0.).is_near(Point::new(0.05, 0.), 0.1));
        assert!(!Point::new(0., 0.).is_near(Point::new(1., 1.), 0.1));
        let inf = Point::new(f32::INFINITY, 0.);
        assert!(inf.is_near(inf, 0.));
        assert!(!inf.is_near(Point::new(f32::NEG_INFINITY, 0.), 1.));
    }
}
