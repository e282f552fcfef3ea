// Copyright 2021 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polylines.
use crate::Point;

use alloc::vec::Vec;

/// An ordered sequence of points joined by straight segments.
///
/// This is what the buffer, save and meta stages accumulate, and what
/// [`Pipeline::line`](crate::Pipeline::line) replays into the pipe.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Construct an empty `Polyline`.
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Construct a new `Polyline` from a vector of [`Point`]s.
    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Return the polyline's vertices.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// The number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a vertex.
    #[inline]
    pub fn push(&mut self, point: Point) {
        self.0.push(point);
    }

    /// Remove all vertices, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The last vertex, if any.
    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.0.last().copied()
    }

    /// Iterate over the vertices.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().copied()
    }

    /// Total length of the segments.
    pub fn length(&self) -> f32 {
        self.0.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Consume the polyline, returning its vertices.
    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Point> for Polyline {
    fn extend<T: IntoIterator<Item = Point>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl From<Vec<Point>> for Polyline {
    #[inline]
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl AsRef<[Point]> for Polyline {
    #[inline]
    fn as_ref(&self) -> &[Point] {
        &self.0
    }
}
