// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parametric cubic spline fitting, with tension and scallops.
//!
//! The cubic between any two adjacent input points is a linear blend of two
//! quadratics in the arc-length parameter `s`: the one through those two
//! points and the point to their left, and the one through the two points
//! and the point to their right:
//!
//! ```text
//! (x, y) = wl(s) * (al s² + bl s + cl) + wr(s) * (ar s² + br s + cr)
//! ```
//!
//! This gives continuity of value and slope at every input point, and is
//! equivalent to the usual tridiagonal solution. Only a sliding window of
//! input points is needed, so the stroke is processed as it arrives.
//!
//! At the ends of an open stroke the missing quadratic degenerates to a
//! straight line, which is the "natural" end condition. A closed stroke
//! replays its first three points at the end to close the loop smoothly.
//!
//! With tension `τ > 0` the solution has the form
//! `a e^(τs) + b + c e^(-τs)`; multiplying through by `t = e^(τs)` turns it
//! back into a quadratic in `t`, so the same machinery applies to the
//! transformed coordinates `(t x, t y)`. The family is unchanged by a shift
//! of `s`, so `t` is measured from the middle point of the current window
//! and stays in range however long the stroke is. A single segment too long
//! for the transform is sampled along its chord.

use core::f32::consts::PI;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::{Point, Stage, StageContext, Vec2};

/// Spline parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplineParams {
    /// Arc-length spacing of the output points.
    pub resolution: f32,
    /// Join the end of the stroke smoothly back to its start.
    pub closed: bool,
    /// Stiffness; zero or less gives the plain cubic spline.
    pub tension: f32,
    /// Period of the scallop, in arc length. Negative selects the
    /// one-sided (rectified) form.
    pub period: f32,
    /// Amplitude of the scallop. Zero disables it.
    pub amplitude: f32,
}

impl SplineParams {
    /// An open spline without tension or scallops, sampled every `resolution`.
    pub fn new(resolution: f32) -> Self {
        SplineParams {
            resolution,
            closed: false,
            tension: 0.0,
            period: 0.0,
            amplitude: 0.0,
        }
    }

    /// Builder method for closing the curve.
    #[must_use]
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Builder method for setting the tension.
    #[must_use]
    pub fn with_tension(mut self, tension: f32) -> Self {
        self.tension = tension;
        self
    }

    /// Builder method for adding a scallop.
    ///
    /// A positive `period` gives a symmetric wave, a negative one a series
    /// of one-sided scallops.
    #[must_use]
    pub fn with_scallop(mut self, period: f32, amplitude: f32) -> Self {
        self.period = period;
        self.amplitude = amplitude;
        self
    }
}

/// An input point with its arc length and tension-transformed values.
#[derive(Clone, Copy, Debug, Default)]
struct Knot {
    p: Point,
    s: f32,
    /// `p` scaled by `ts`.
    t: Vec2,
    /// The transformed parameter, measured from the current base.
    ts: f32,
}

impl Knot {
    fn new(tension: f32, p: Point, s: f32, base: f32) -> Self {
        if tension <= 0.0 {
            Knot {
                p,
                s,
                t: p.to_vec2(),
                ts: s,
            }
        } else {
            let ts = (tension * (s - base)).exp();
            Knot {
                p,
                s,
                t: p.to_vec2() * ts,
                ts,
            }
        }
    }
}

/// `(a t + b) t + c`, plus the chord slope `d` it was built from.
#[derive(Clone, Copy, Debug, Default)]
struct Quadratic {
    a: Vec2,
    b: Vec2,
    c: Vec2,
    d: Vec2,
}

impl Quadratic {
    /// The straight line through `k` with slope `d`.
    fn line(k: &Knot, d: Vec2) -> Self {
        Quadratic {
            a: Vec2::ZERO,
            b: d,
            c: k.t - k.ts * d,
            d,
        }
    }

    /// The quadratic through `k0`, `k1` and `k2`, where `left` passes
    /// through `k0` and `k1`.
    fn through(left: &Quadratic, k0: &Knot, k1: &Knot, k2: &Knot) -> Self {
        let d = (k2.t - k1.t) / (k2.ts - k1.ts);
        let a = (d - left.d) / (k2.ts - k0.ts);
        let b = left.d - a * (k1.ts + k0.ts);
        let c = k0.t - k0.ts * (b + k0.ts * a);
        Quadratic { a, b, c, d }
    }

    /// Re-express in a parameter scaled down by `k`.
    fn rebase(&mut self, k: f32) {
        self.a *= k;
        self.c /= k;
    }

    #[inline]
    fn eval(&self, t: f32) -> Vec2 {
        (self.a * t + self.b) * t + self.c
    }
}

/// Transverse sinusoidal perturbation of the output.
#[derive(Clone, Copy, Debug, Default)]
struct Scallop {
    enabled: bool,
    rectified: bool,
    /// The previous unperturbed output point.
    origin: Point,
    s0: f32,
    freq: f32,
    amplitude: f32,
}

impl Scallop {
    fn new(params: &SplineParams, origin: Point, s0: f32) -> Self {
        let enabled = params.period != 0.0 && params.amplitude != 0.0;
        if !enabled {
            return Scallop::default();
        }
        Scallop {
            enabled,
            rectified: params.period < 0.0,
            origin,
            s0,
            freq: PI / params.period.abs(),
            amplitude: params.amplitude / params.resolution,
        }
    }

    /// Displace `p` across the direction of travel from the previous point.
    fn apply(&mut self, p: Point, s: f32) -> Point {
        if !self.enabled {
            return p;
        }
        let mut t = (self.freq * (s - self.s0)).sin();
        if self.rectified {
            t = t.abs();
        }
        t *= self.amplitude;
        let dx = t * (p.y - self.origin.y);
        let dy = t * (p.x - self.origin.x);
        self.origin = p;
        Point::new(p.x - dx, p.y + dy)
    }
}

/// The spline stage.
#[derive(Clone, Debug)]
pub struct Spline {
    params: SplineParams,
    /// Input points closer than this to their predecessor are dropped.
    eps: f32,
    /// Points accepted in the current stroke, including replayed ones.
    count: usize,
    /// Arc length of the next output point.
    s: f32,
    /// Arc length at which the tension transform is 1.
    base: f32,
    /// First, second and third points of a closed stroke.
    head: [Point; 3],
    /// First output point of a closed stroke.
    close: Option<Point>,
    a: Knot,
    b: Knot,
    c: Knot,
    left: Quadratic,
    right: Quadratic,
    scallop: Scallop,
}

impl Spline {
    /// A spline ready for a fresh stroke.
    ///
    /// The resolution must be finite and positive;
    /// [`Pipeline::enable_spline`](crate::Pipeline::enable_spline) checks this.
    pub fn new(params: SplineParams) -> Self {
        Spline {
            params,
            eps: params.resolution / 10.0,
            count: 0,
            s: 0.0,
            base: 0.0,
            head: [Point::ZERO; 3],
            close: None,
            a: Knot::default(),
            b: Knot::default(),
            c: Knot::default(),
            left: Quadratic::default(),
            right: Quadratic::default(),
            scallop: Scallop::default(),
        }
    }

    /// The parameters in use.
    pub fn params(&self) -> SplineParams {
        self.params
    }

    /// Emit points along the current segment, from `a` up to (not including) `b`.
    fn segment(&mut self, cx: &mut StageContext<'_>) {
        let (a, b) = (self.a.s, self.b.s);
        while self.s < b {
            let s = self.s;
            let (tw, ts) = if self.params.tension <= 0.0 {
                (1.0, s)
            } else {
                let e = (self.params.tension * (s - self.base)).exp();
                (e, e)
            };
            let wl = (b - s) / (b - a) / tw;
            let wr = (s - a) / (b - a) / tw;
            let mut v = self.left.eval(ts) * wl + self.right.eval(ts) * wr;
            if !v.is_finite() {
                tracing::trace!(s, "spline: tension transform out of range, using the chord");
                v = self.a.p.lerp(self.b.p, (s - a) / (b - a)).to_vec2();
            }
            let p = self.scallop.apply(v.to_point(), s);
            cx.emit(p);
            if self.close.is_none() {
                self.close = Some(p);
            }
            let next = s + self.params.resolution;
            if next <= s {
                // The step is lost in the magnitude of s.
                break;
            }
            self.s = next;
        }
    }

    /// Measure the tension transform from `base` instead.
    fn rebase(&mut self, base: f32) {
        let tension = self.params.tension;
        if tension <= 0.0 {
            return;
        }
        let k = (tension * (base - self.base)).exp();
        self.base = base;
        self.a = Knot::new(tension, self.a.p, self.a.s, base);
        self.b = Knot::new(tension, self.b.p, self.b.s, base);
        self.left.rebase(k);
    }

    /// Move the right-hand segment into the left.
    fn shift(&mut self) {
        self.a = self.b;
        self.b = self.c;
        self.left = self.right;
    }

    fn reset(&mut self) {
        self.count = 0;
        self.s = 0.0;
        self.base = 0.0;
        self.close = None;
    }
}

impl Stage for Spline {
    fn put(&mut self, point: Point, cx: &mut StageContext<'_>) {
        let tension = self.params.tension;
        self.count += 1;

        if self.count == 1 {
            self.a = Knot::new(tension, point, 0.0, self.base);
            if self.params.closed {
                self.head[0] = point;
            } else {
                self.s = self.a.s;
                self.scallop = Scallop::new(&self.params, self.a.p, self.a.s);
            }
            return;
        }

        if self.count == 2 {
            let sb = self.a.s + point.distance(self.a.p);
            if sb - self.a.s < self.eps {
                tracing::trace!(?point, "spline: dropping coincident point");
                self.count -= 1;
                return;
            }
            self.b = Knot::new(tension, point, sb, self.base);
            // Straight left-hand segment: the first point has nothing to its left.
            let d = (self.b.t - self.a.t) / (self.b.ts - self.a.ts);
            self.left = Quadratic::line(&self.a, d);
            if self.params.closed {
                self.s = self.b.s;
                self.head[1] = point;
                self.scallop = Scallop::new(&self.params, self.b.p, self.b.s);
            }
            return;
        }

        let sc = self.b.s + point.distance(self.b.p);
        if sc - self.b.s < self.eps {
            tracing::trace!(?point, "spline: dropping coincident point");
            self.count -= 1;
            return;
        }
        self.rebase(self.b.s);
        self.c = Knot::new(tension, point, sc, self.base);
        self.right = Quadratic::through(&self.left, &self.a, &self.b, &self.c);

        if self.count == 3 && self.params.closed {
            // The segment from the first point is produced when the loop closes.
            self.head[2] = point;
        } else {
            self.segment(cx);
        }
        self.shift();
    }

    fn flush(&mut self, cx: &mut StageContext<'_>) {
        let complete = if self.params.closed {
            if self.count >= 3 {
                let head = self.head;
                for p in head {
                    self.put(p, cx);
                }
                true
            } else {
                false
            }
        } else if self.count >= 2 {
            // Straight right-hand segment: the last point has nothing to its right.
            self.right = Quadratic::line(&self.b, self.left.d);
            self.segment(cx);
            self.shift();
            true
        } else {
            false
        };

        if complete {
            match self.close {
                Some(p) if self.params.closed => cx.emit(p),
                _ => cx.emit(self.a.p),
            }
        }
        cx.flush();
        self.reset();
    }
}
