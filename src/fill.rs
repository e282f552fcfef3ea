// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion of evenly spaced points along long segments.

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::{Point, Stage, StageContext};

/// Most points the fill stage inserts along a single segment.
///
/// A longer gap is passed on unfilled.
pub const MAX_FILL_STEPS: u32 = 1 << 16;

/// Fill parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillParams {
    /// Maximum spacing of the output points.
    pub resolution: f32,
}

impl FillParams {
    /// Fill to the given spacing.
    pub fn new(resolution: f32) -> Self {
        FillParams { resolution }
    }
}

/// The fill stage.
///
/// Every input point is passed on. A segment longer than the resolution is
/// split into `ceil(length / resolution)` equal steps of exactly
/// `resolution`, the last one shorter.
#[derive(Clone, Debug)]
pub struct Fill {
    params: FillParams,
    new_line: bool,
    anchor: Point,
}

impl Fill {
    /// A filler ready for a fresh stroke.
    pub fn new(params: FillParams) -> Self {
        Fill {
            params,
            new_line: true,
            anchor: Point::ZERO,
        }
    }

    /// The parameters in use.
    pub fn params(&self) -> FillParams {
        self.params
    }
}

impl Stage for Fill {
    fn put(&mut self, point: Point, cx: &mut StageContext<'_>) {
        if !self.new_line {
            let res = self.params.resolution;
            let delta = point - self.anchor;
            let dist = delta.hypot();
            if dist > res {
                let steps = (dist / res).ceil();
                if steps <= MAX_FILL_STEPS as f32 {
                    let step = delta * (res / dist);
                    let mut k = 1.0;
                    while k < steps {
                        cx.emit(self.anchor + step * k);
                        k += 1.0;
                    }
                } else {
                    tracing::warn!(
                        from = ?self.anchor,
                        to = ?point,
                        resolution = res,
                        "fill: segment needs more than {MAX_FILL_STEPS} points, left unfilled"
                    );
                }
            }
        }
        self.new_line = false;
        self.anchor = point;
        cx.emit(point);
    }

    fn flush(&mut self, cx: &mut StageContext<'_>) {
        self.new_line = true;
        cx.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::testing::{points, pts, run_stroke};

    #[test]
    fn long_segment_is_filled() {
        let mut fill = Fill::new(FillParams::new(3.0));
        let out = points(&run_stroke(&mut fill, &pts(&[(0.0, 0.0), (10.0, 0.0)])));
        let expected = pts(&[(0.0, 0.0), (3.0, 0.0), (6.0, 0.0), (9.0, 0.0), (10.0, 0.0)]);
        assert_eq!(out.len(), expected.len());
        for (p, q) in out.iter().zip(&expected) {
            assert!(p.is_near(*q, 1e-5), "{p:?} != {q:?}");
        }
    }

    #[test]
    fn point_count_per_segment() {
        let mut fill = Fill::new(FillParams::new(3.0));
        // Lengths 10, 5 and 2: ceil(10/3) + ceil(5/3) + 1 steps.
        let input = pts(&[(0.0, 0.0), (6.0, 8.0), (6.0, 3.0), (6.0, 1.0)]);
        let out = points(&run_stroke(&mut fill, &input));
        assert_eq!(out.len(), 1 + 4 + 2 + 1);
        for w in out.windows(2) {
            assert!(w[0].distance(w[1]) <= 3.0 + 1e-4);
        }
        for p in &input {
            assert!(out.contains(p));
        }
    }

    #[test]
    fn short_segments_untouched() {
        let mut fill = Fill::new(FillParams::new(5.0));
        let input = pts(&[(0.0, 0.0), (1.0, 1.0), (5.0, 1.0)]);
        assert_eq!(points(&run_stroke(&mut fill, &input)), input);
    }

    #[test]
    fn huge_gap_is_left_unfilled() {
        let mut fill = Fill::new(FillParams::new(1.0));
        let input = pts(&[(0.0, 0.0), (1.0e12, 0.0), (1.0e12, 2.0)]);
        let out = points(&run_stroke(&mut fill, &input));
        assert_eq!(out, pts(&[(0.0, 0.0), (1.0e12, 0.0), (1.0e12, 1.0), (1.0e12, 2.0)]));
    }

    #[test]
    fn no_fill_across_strokes() {
        let mut fill = Fill::new(FillParams::new(1.0));
        run_stroke(&mut fill, &pts(&[(0.0, 0.0)]));
        let out = points(&run_stroke(&mut fill, &pts(&[(100.0, 0.0)])));
        assert_eq!(out, pts(&[(100.0, 0.0)]));
    }
}
