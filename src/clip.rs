// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipping to a rectangular window.
//!
//! Each segment is parameterised as `P + a (Q - P)` for `a` in `[0, 1]`,
//! and the parameters at which it enters and leaves each slab of the window
//! are compared (Liang and Barsky). In polygon mode the corners of the
//! window that the boundary wraps round are inserted, so a clipped polygon
//! stays a polygon. In line mode the stroke is broken wherever it leaves
//! the window.

use crate::{Point, Rect, Stage, StageContext};

/// Clip parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipParams {
    /// The window; edges are inclusive.
    pub window: Rect,
    /// Insert window corners, keeping the output a single polygon.
    pub polygon: bool,
    /// In polygon mode, join the last output point back to the first.
    pub closed: bool,
}

impl ClipParams {
    /// Line-mode clipping to the given edges, which may be in either order.
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        ClipParams {
            window: Rect::from_edges(left, right, bottom, top),
            polygon: false,
            closed: false,
        }
    }

    /// Builder method for selecting polygon mode.
    #[must_use]
    pub fn with_polygon(mut self, polygon: bool) -> Self {
        self.polygon = polygon;
        self
    }

    /// Builder method for closing the polygon.
    #[must_use]
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }
}

/// Where a segment crosses into a slab, and at what parameter.
fn entry(lo: f32, hi: f32, p: f32, d: f32) -> (f32, f32) {
    if d > 0.0 {
        (lo, (lo - p) / d)
    } else if d < 0.0 {
        (hi, (hi - p) / d)
    } else if p > hi {
        (lo, f32::NEG_INFINITY)
    } else {
        (hi, f32::NEG_INFINITY)
    }
}

/// Where a segment crosses out of a slab, and at what parameter.
fn exit(lo: f32, hi: f32, p: f32, d: f32) -> (f32, f32) {
    if d > 0.0 {
        (hi, (hi - p) / d)
    } else if d < 0.0 {
        (lo, (lo - p) / d)
    } else if p > hi {
        (hi, f32::NEG_INFINITY)
    } else if p < lo {
        (lo, f32::NEG_INFINITY)
    } else {
        (lo, f32::INFINITY)
    }
}

/// The clip stage.
#[derive(Clone, Debug)]
pub struct Clip {
    params: ClipParams,
    new_line: bool,
    /// Has anything been passed on since the last flush?
    has_output: bool,
    /// First output point, kept for closing a polygon.
    first: Option<Point>,
    /// Previous input point, unclipped.
    prev: Point,
}

impl Clip {
    /// A clipper ready for a fresh stroke.
    pub fn new(params: ClipParams) -> Self {
        Clip {
            params,
            new_line: true,
            has_output: false,
            first: None,
            prev: Point::ZERO,
        }
    }

    /// The parameters in use.
    pub fn params(&self) -> ClipParams {
        self.params
    }

    fn output(&mut self, point: Point, cx: &mut StageContext<'_>) {
        if !self.has_output {
            self.has_output = true;
            if self.params.polygon && self.params.closed {
                self.first = Some(point);
            }
        }
        cx.emit(point);
    }

    /// Clip the segment from `self.prev` to `q`.
    fn segment(&mut self, q: Point, cx: &mut StageContext<'_>) {
        let Rect { x0, y0, x1, y1 } = self.params.window;
        let polygon = self.params.polygon;
        let p = self.prev;
        let d = q - p;

        let (xin, axin) = entry(x0, x1, p.x, d.x);
        let (yin, ayin) = entry(y0, y1, p.y, d.y);
        let ain1 = axin.min(ayin);
        let ain2 = axin.max(ayin);

        if 1.0 < ain1 {
            tracing::trace!(?q, "clip: segment ends before reaching either slab");
            return;
        }
        if 0.0 < ain1 {
            tracing::trace!(x = xin, y = yin, "clip: turning vertex on entry");
            if polygon {
                self.output(Point::new(xin, yin), cx);
            }
        }
        if 1.0 < ain2 {
            tracing::trace!(?q, "clip: segment ends before entering the window");
            return;
        }

        let (xout, axout) = exit(x0, x1, p.x, d.x);
        let (yout, ayout) = exit(y0, y1, p.y, d.y);
        let aout1 = axout.min(ayout);

        if 0.0 >= ain2 && 0.0 >= aout1 {
            tracing::trace!(?q, "clip: segment starts beyond the window");
            if aout1 == 0.0 && !polygon {
                cx.flush();
            }
            return;
        }

        if ain2 <= aout1 {
            let mut entered = None;
            if 0.0 < ain2 {
                let enter = if axin > ayin {
                    Point::new(xin, p.y + axin * d.y)
                } else {
                    Point::new(p.x + ayin * d.x, yin)
                };
                tracing::trace!(?enter, "clip: coming in");
                self.output(enter, cx);
                entered = Some(enter);
            }
            if 1.0 > aout1 {
                let leave = if axout < ayout {
                    Point::new(xout, p.y + axout * d.y)
                } else {
                    Point::new(p.x + ayout * d.x, yout)
                };
                tracing::trace!(?leave, "clip: going out");
                self.output(leave, cx);
                if !polygon {
                    cx.flush();
                }
            } else if entered != Some(q) {
                self.output(q, cx);
            }
        } else if polygon {
            let corner = if axin > ayin {
                Point::new(xin, yout)
            } else {
                Point::new(xout, yin)
            };
            tracing::trace!(?corner, "clip: turning vertex on exit");
            self.output(corner, cx);
        }
    }
}

impl Stage for Clip {
    fn put(&mut self, point: Point, cx: &mut StageContext<'_>) {
        if self.new_line {
            self.new_line = false;
            if self.params.window.contains(point) {
                self.output(point, cx);
            }
        } else {
            self.segment(point, cx);
        }
        self.prev = point;
    }

    fn flush(&mut self, cx: &mut StageContext<'_>) {
        if let Some(first) = self.first.take() {
            cx.emit(first);
        }
        cx.flush();
        self.new_line = true;
        self.has_output = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::testing::{points, pts, run_stroke, strokes};
    use crate::Event;

    fn window() -> ClipParams {
        ClipParams::new(0.0, 10.0, 0.0, 10.0)
    }

    #[test]
    fn edges_are_normalised() {
        assert_eq!(
            ClipParams::new(10.0, 0.0, 10.0, 0.0).window,
            window().window
        );
    }

    #[test]
    fn inside_passes_unchanged() {
        let input = pts(&[(1.0, 1.0), (9.0, 2.0), (5.0, 9.0), (0.0, 10.0)]);
        for params in [window(), window().with_polygon(true)] {
            let mut clip = Clip::new(params);
            assert_eq!(points(&run_stroke(&mut clip, &input)), input);
        }
    }

    #[test]
    fn outside_is_dropped() {
        let mut clip = Clip::new(window().with_polygon(true));
        let out = run_stroke(&mut clip, &pts(&[(20.0, 20.0), (30.0, 30.0), (25.0, 40.0)]));
        assert_eq!(out, [Event::Flush]);
    }

    #[test]
    fn crossing_segment_is_cut_at_both_edges() {
        let mut clip = Clip::new(window());
        let out = run_stroke(&mut clip, &pts(&[(-5.0, 5.0), (15.0, 5.0)]));
        assert_eq!(strokes(&out), [pts(&[(0.0, 5.0), (10.0, 5.0)])]);
    }

    #[test]
    fn polygon_wraps_round_corner() {
        let input = [(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)];
        let mut clip = Clip::new(window().with_polygon(true));
        let out = points(&run_stroke(&mut clip, &pts(&input)));
        assert_eq!(out, pts(&[(5.0, 5.0), (10.0, 5.0), (10.0, 10.0)]));

        let mut clip = Clip::new(window().with_polygon(true));
        let mut closing = pts(&input);
        closing.push(Point::new(5.0, 5.0));
        let out = points(&run_stroke(&mut clip, &closing));
        assert_eq!(
            out,
            pts(&[(5.0, 5.0), (10.0, 5.0), (10.0, 10.0), (5.0, 10.0), (5.0, 5.0)])
        );
    }

    #[test]
    fn closed_polygon_rejoins_first_point() {
        let input = pts(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)]);
        let mut clip = Clip::new(window().with_polygon(true).with_closed(true));
        let out = run_stroke(&mut clip, &input);
        assert_eq!(
            strokes(&out),
            [pts(&[(5.0, 5.0), (10.0, 5.0), (10.0, 10.0), (5.0, 5.0)])]
        );
        // Nothing to close when nothing was visible.
        let out = run_stroke(&mut clip, &pts(&[(20.0, 20.0), (30.0, 20.0)]));
        assert_eq!(out, [Event::Flush]);
    }

    #[test]
    fn line_mode_breaks_on_exit() {
        let mut clip = Clip::new(window());
        let input = pts(&[(5.0, 5.0), (15.0, 5.0), (15.0, 8.0), (5.0, 8.0)]);
        let out = run_stroke(&mut clip, &input);
        assert_eq!(
            strokes(&out),
            [pts(&[(5.0, 5.0), (10.0, 5.0)]), pts(&[(10.0, 8.0), (5.0, 8.0)])]
        );
        assert_eq!(out.iter().filter(|e| **e == Event::Flush).count(), 2);
    }

    #[test]
    fn line_mode_breaks_when_leaving_from_the_edge() {
        let mut clip = Clip::new(window());
        let input = pts(&[(5.0, 5.0), (10.0, 5.0), (15.0, 5.0), (15.0, 8.0), (10.0, 8.0), (5.0, 8.0)]);
        let out = run_stroke(&mut clip, &input);
        assert_eq!(
            strokes(&out),
            [pts(&[(5.0, 5.0), (10.0, 5.0)]), pts(&[(10.0, 8.0), (5.0, 8.0)])]
        );
        assert_eq!(out.iter().filter(|e| **e == Event::Flush).count(), 2);
    }

    #[test]
    fn entry_at_segment_end_is_not_repeated() {
        let mut clip = Clip::new(window().with_polygon(true));
        let out = points(&run_stroke(&mut clip, &pts(&[(15.0, 5.0), (10.0, 5.0), (5.0, 5.0)])));
        assert_eq!(out, pts(&[(10.0, 5.0), (5.0, 5.0)]));
    }

    #[test]
    fn output_is_inside_window() {
        let input = pts(&[(-3.0, 4.0), (7.0, -6.0), (12.0, 3.0), (4.0, 14.0), (-3.0, 4.0)]);
        for params in [window(), window().with_polygon(true).with_closed(true)] {
            let mut clip = Clip::new(params);
            for p in points(&run_stroke(&mut clip, &input)) {
                let inside = p.x >= -1e-4 && p.x <= 10.0 + 1e-4 && p.y >= -1e-4 && p.y <= 10.0 + 1e-4;
                assert!(inside, "{p:?} outside the window");
            }
        }
    }
}
