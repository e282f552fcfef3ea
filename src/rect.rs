// Copyright 2018 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle.

use crate::Point;

/// An axis-aligned rectangle, used as the clipping window.
///
/// The y axis points up: `y0` is the bottom edge and `y1` the top edge.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f32,
    /// The minimum y coordinate (bottom edge).
    pub y0: f32,
    /// The maximum x coordinate (right edge).
    pub x1: f32,
    /// The maximum y coordinate (top edge).
    pub y1: f32,
}

impl Rect {
    /// A new rectangle from minimum and maximum coordinates.
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// A new rectangle from its four edges, in any order.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_edges(left: f32, right: f32, bottom: f32, top: f32) -> Rect {
        Rect::new(left, bottom, right, top).abs()
    }

    /// A new rectangle from two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect {
            x0: p0.x,
            y0: p0.y,
            x1: p1.x,
            y1: p1.y,
        }
        .abs()
    }

    /// The width of the rectangle.
    ///
    /// Note: nothing forbids negative width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    ///
    /// Note: nothing forbids negative height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Take absolute value of width and height.
    ///
    /// The resulting rect has the same extents as the original, but is
    /// guaranteed to have non-negative width and height.
    #[inline]
    pub fn abs(&self) -> Rect {
        let Rect { x0, y0, x1, y1 } = *self;
        Rect {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Returns `true` if `point` lies within the rectangle, edges included.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x0 && point.x <= self.x1 && point.y >= self.y0 && point.y <= self.y1
    }

    /// Are all four edges finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}
