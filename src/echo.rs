// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Echo each point as a marker.

use crate::{Colour, Highlight, MarkerType, Point, Stage, StageContext};

/// Echo parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EchoParams {
    /// Colour of the markers.
    pub colour: Colour,
}

impl EchoParams {
    /// Echo in the given colour.
    pub fn new(colour: Colour) -> Self {
        EchoParams { colour }
    }
}

/// The echo stage.
#[derive(Clone, Debug)]
pub struct Echo {
    params: EchoParams,
}

impl Echo {
    /// An echo stage drawing with `params`.
    pub fn new(params: EchoParams) -> Self {
        Echo { params }
    }

    /// The parameters in use.
    pub fn params(&self) -> EchoParams {
        self.params
    }
}

impl Stage for Echo {
    fn put(&mut self, point: Point, cx: &mut StageContext<'_>) {
        let r = cx.renderer();
        r.set_colour(self.params.colour, Highlight::NONE);
        r.set_marker_size(0.0);
        r.set_marker_angle(0.0);
        r.draw_marker(MarkerType::ECHO, point.x, point.y);
        cx.emit(point);
    }

    fn flush(&mut self, cx: &mut StageContext<'_>) {
        cx.flush();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::stage::testing::{pts, run_stroke_with};
    use crate::{Event, Renderer};

    #[derive(Default)]
    struct Markers(Vec<(Colour, MarkerType, f32, f32)>, Colour);

    impl Renderer for Markers {
        fn set_colour(&mut self, colour: Colour, _highlight: Highlight) {
            self.1 = colour;
        }

        fn draw_marker(&mut self, marker: MarkerType, x: f32, y: f32) {
            self.0.push((self.1, marker, x, y));
        }
    }

    #[test]
    fn one_marker_per_point() {
        let mut echo = Echo::new(EchoParams::new(Colour(3)));
        let mut markers = Markers::default();
        let input = pts(&[(1.0, 2.0), (3.0, 4.0)]);
        let out = run_stroke_with(&mut echo, &input, &mut markers);
        assert_eq!(
            markers.0,
            [
                (Colour(3), MarkerType::ECHO, 1.0, 2.0),
                (Colour(3), MarkerType::ECHO, 3.0, 4.0)
            ]
        );
        assert_eq!(
            out,
            [Event::Point(input[0]), Event::Point(input[1]), Event::Flush]
        );
    }
}
