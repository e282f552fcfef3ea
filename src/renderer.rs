// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing interface consumed by the echo and display stages.
//!
//! Rendering itself belongs to the embedding application. The pipe only
//! calls into it, through the [`Renderer`] trait. Every method has an empty
//! default, so an implementation only overrides what it supports and the
//! rest are skipped.

/// A colour index understood by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Colour(pub i32);

/// A highlight index understood by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Highlight(pub i32);

impl Highlight {
    /// No highlighting.
    pub const NONE: Highlight = Highlight(0);
}

/// A line style index understood by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineStyle(pub i32);

/// A marker type understood by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerType(pub i32);

impl MarkerType {
    /// The marker drawn by the echo stage.
    pub const ECHO: MarkerType = MarkerType(0);
}

/// Drawing callbacks supplied by the embedding renderer.
pub trait Renderer {
    /// Select the colour for subsequent drawing.
    fn set_colour(&mut self, _colour: Colour, _highlight: Highlight) {}

    /// Select the line style. A zero `width` or `length` means the style's own default.
    fn set_line_style(&mut self, _style: LineStyle, _width: f32, _length: f32) {}

    /// Move the pen without drawing.
    fn move_to(&mut self, _x: f32, _y: f32) {}

    /// Draw a line from the pen position, moving the pen.
    fn draw_to(&mut self, _x: f32, _y: f32) {}

    /// Set the size of subsequent markers.
    fn set_marker_size(&mut self, _size: f32) {}

    /// Set the angle of subsequent markers, in degrees.
    fn set_marker_angle(&mut self, _angle: f32) {}

    /// Draw a marker at the given position.
    fn draw_marker(&mut self, _marker: MarkerType, _x: f32, _y: f32) {}

    /// Push any pending drawing to the display.
    fn flush_drawing(&mut self) {}
}

/// A renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRenderer;

impl Renderer for NoRenderer {}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn set_colour(&mut self, colour: Colour, highlight: Highlight) {
        (**self).set_colour(colour, highlight);
    }

    fn set_line_style(&mut self, style: LineStyle, width: f32, length: f32) {
        (**self).set_line_style(style, width, length);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        (**self).move_to(x, y);
    }

    fn draw_to(&mut self, x: f32, y: f32) {
        (**self).draw_to(x, y);
    }

    fn set_marker_size(&mut self, size: f32) {
        (**self).set_marker_size(size);
    }

    fn set_marker_angle(&mut self, angle: f32) {
        (**self).set_marker_angle(angle);
    }

    fn draw_marker(&mut self, marker: MarkerType, x: f32, y: f32) {
        (**self).draw_marker(marker, x, y);
    }

    fn flush_drawing(&mut self) {
        (**self).flush_drawing();
    }
}
