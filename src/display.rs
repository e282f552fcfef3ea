// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw the stroke as a connected line.

use crate::{Colour, Highlight, LineStyle, Point, Stage, StageContext};

/// Display parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayParams {
    /// Colour of the line.
    pub colour: Colour,
    /// Line style.
    pub style: LineStyle,
}

impl DisplayParams {
    /// Draw in the given colour and style.
    pub fn new(colour: Colour, style: LineStyle) -> Self {
        DisplayParams { colour, style }
    }
}

/// The display stage.
#[derive(Clone, Debug)]
pub struct Display {
    params: DisplayParams,
    new_line: bool,
}

impl Display {
    /// A display stage ready for a fresh stroke.
    pub fn new(params: DisplayParams) -> Self {
        Display {
            params,
            new_line: true,
        }
    }

    /// The parameters in use.
    pub fn params(&self) -> DisplayParams {
        self.params
    }
}

impl Stage for Display {
    fn put(&mut self, point: Point, cx: &mut StageContext<'_>) {
        let r = cx.renderer();
        if self.new_line {
            self.new_line = false;
            r.set_colour(self.params.colour, Highlight::NONE);
            r.set_line_style(self.params.style, 0.0, 0.0);
            r.move_to(point.x, point.y);
        } else {
            r.draw_to(point.x, point.y);
        }
        cx.emit(point);
    }

    fn flush(&mut self, cx: &mut StageContext<'_>) {
        cx.renderer().flush_drawing();
        self.new_line = true;
        cx.flush();
    }
}
