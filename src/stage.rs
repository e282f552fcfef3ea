// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interface every pipe stage implements.

use smallvec::SmallVec;

use crate::{Point, Renderer};

/// One item of traffic in the pipe.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Event {
    /// The next point of the current stroke.
    Point(Point),
    /// End of the current stroke (pen up).
    Flush,
}

/// Events emitted by a stage during a single call.
///
/// Most stages emit zero, one or two events per call; spline output spills
/// to the heap.
pub type Emitted = SmallVec<[Event; 8]>;

/// What a stage can reach while it handles a point or a flush.
pub struct StageContext<'a> {
    output: &'a mut Emitted,
    renderer: &'a mut dyn Renderer,
}

impl<'a> StageContext<'a> {
    /// Create a context writing into `output`.
    pub fn new(output: &'a mut Emitted, renderer: &'a mut dyn Renderer) -> Self {
        StageContext { output, renderer }
    }

    /// Pass a point on to the stage's successors.
    #[inline]
    pub fn emit(&mut self, point: Point) {
        self.output.push(Event::Point(point));
    }

    /// Pass a flush on to the stage's successors.
    #[inline]
    pub fn flush(&mut self) {
        self.output.push(Event::Flush);
    }

    /// The drawing callbacks.
    #[inline]
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }
}

impl core::fmt::Debug for StageContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StageContext")
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// A module that takes part in the pipe.
///
/// A stage sees only the traffic that reaches it while its node is enabled.
/// Whatever it writes to the context is delivered to its successors, in
/// order, as soon as the call returns.
pub trait Stage {
    /// Handle the next point of the current stroke.
    fn put(&mut self, point: Point, cx: &mut StageContext<'_>);

    /// Handle the end of the current stroke.
    ///
    /// On return the stage must be ready for a fresh stroke.
    fn flush(&mut self, cx: &mut StageContext<'_>);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers for driving a single stage in isolation.

    use alloc::vec::Vec;

    use super::{Emitted, Event, Stage, StageContext};
    use crate::{NoRenderer, Point, Renderer};

    /// Run `points` then a flush through `stage`, returning everything it emitted.
    pub(crate) fn run_stroke(stage: &mut impl Stage, points: &[Point]) -> Vec<Event> {
        run_stroke_with(stage, points, &mut NoRenderer)
    }

    pub(crate) fn run_stroke_with(
        stage: &mut impl Stage,
        points: &[Point],
        renderer: &mut dyn Renderer,
    ) -> Vec<Event> {
        let mut out = Emitted::new();
        let mut all = Vec::new();
        for &p in points {
            stage.put(p, &mut StageContext::new(&mut out, renderer));
            all.extend(out.drain(..));
        }
        stage.flush(&mut StageContext::new(&mut out, renderer));
        all.extend(out.drain(..));
        all
    }

    /// The points of `events`, ignoring flushes.
    pub(crate) fn points(events: &[Event]) -> Vec<Point> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Point(p) => Some(*p),
                Event::Flush => None,
            })
            .collect()
    }

    /// Split `events` into strokes at each flush; trailing empty strokes are dropped.
    pub(crate) fn strokes(events: &[Event]) -> Vec<Vec<Point>> {
        let mut result = Vec::new();
        let mut current = Vec::new();
        for e in events {
            match e {
                Event::Point(p) => current.push(*p),
                Event::Flush => {
                    if !current.is_empty() {
                        result.push(core::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            result.push(current);
        }
        result
    }

    pub(crate) fn pts(coords: &[(f32, f32)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }
}
