// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc-length and turn-angle decimation.
//!
//! The first and last points of a stroke are always passed on. A point in
//! between is passed on only once the path has moved far enough from it,
//! either in accumulated arc length or in direction.

use core::f32::consts::PI;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::{Point, Stage, StageContext};

/// Filter thresholds.
///
/// A threshold of zero disables that test.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterParams {
    /// Arc length that may accumulate before the anchor is passed on.
    pub resolution: f32,
    /// Turn, in radians, that may accumulate before the anchor is passed on.
    pub angle: f32,
}

impl FilterParams {
    /// Filter on accumulated arc length only.
    pub fn new(resolution: f32) -> Self {
        FilterParams {
            resolution,
            angle: 0.0,
        }
    }

    /// Builder method for setting the turn-angle threshold.
    #[must_use]
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }
}

/// The filter stage.
#[derive(Clone, Debug)]
pub struct Filter {
    params: FilterParams,
    /// Start a new stroke on the next point.
    new_line: bool,
    /// Has anything been passed on in this stroke?
    has_output: bool,
    /// Arc length accumulated since the anchor.
    arc: f32,
    /// Turn accumulated since the anchor.
    turn: f32,
    /// Reference direction of the anchor.
    anchor_dir: f32,
    anchor: Point,
    prev: Point,
}

impl Filter {
    /// A filter ready for a fresh stroke.
    pub fn new(params: FilterParams) -> Self {
        Filter {
            params,
            new_line: true,
            has_output: false,
            arc: 0.0,
            turn: 0.0,
            anchor_dir: 0.0,
            anchor: Point::ZERO,
            prev: Point::ZERO,
        }
    }

    /// The thresholds in use.
    pub fn params(&self) -> FilterParams {
        self.params
    }

    /// With no test enabled nothing can be held back.
    fn is_pass_through(&self) -> bool {
        self.params.resolution <= 0.0 && self.params.angle <= 0.0
    }

    fn within_thresholds(&self) -> bool {
        let FilterParams { resolution, angle } = self.params;
        (angle <= 0.0 || self.turn <= angle) && (resolution <= 0.0 || self.arc <= resolution)
    }

    /// Make `point` the new anchor.
    fn set_anchor(&mut self, point: Point) {
        self.arc = 0.0;
        self.turn = 0.0;
        self.anchor_dir = if self.has_output {
            (point - self.anchor).direction_to(point)
        } else {
            0.0
        };
        self.anchor = point;
        self.prev = point;
    }
}

impl Stage for Filter {
    fn put(&mut self, point: Point, cx: &mut StageContext<'_>) {
        if self.new_line {
            self.new_line = false;
            self.has_output = false;
            self.set_anchor(point);
            return;
        }

        if point == self.prev {
            return;
        }
        if self.params.resolution > 0.0 {
            self.arc += point.distance(self.prev);
        }
        if self.has_output && self.params.angle > 0.0 {
            let dir = (point - self.anchor).direction_to(point);
            self.turn = ((dir - self.anchor_dir) % PI).abs();
        }

        if !self.is_pass_through() && self.within_thresholds() {
            self.prev = point;
            return;
        }

        self.has_output = true;
        cx.emit(self.anchor);
        self.set_anchor(point);
    }

    fn flush(&mut self, cx: &mut StageContext<'_>) {
        if !self.new_line {
            if self.has_output {
                cx.emit(self.prev);
            } else if 100.0 * self.prev.distance(self.anchor) < self.params.resolution {
                // The literal 100 is part of the degenerate-stroke test, not a tunable.
                tracing::trace!(anchor = ?self.anchor, "filter: dropping degenerate stroke");
            } else {
                cx.emit(self.anchor);
                if self.prev != self.anchor {
                    cx.emit(self.prev);
                }
            }
        }
        self.new_line = true;
        self.has_output = false;
        cx.flush();
    }
}
