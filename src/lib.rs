// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A configurable pipe for streams of 2D points.
//!
//! Strokes, sequences of points ended by a flush (pen up), are pushed into
//! a [`Pipeline`] and travel down a small fixed graph of stages:
//!
//! ```text
//!   pipe ── filter ── buffer ─┬─ echo
//!                             └─ spline ─┬─ display
//!                                        └─ clip ── fill ─┬─ save
//!                                                         └─ meta
//! ```
//!
//! Each stage can be enabled or disabled at any time; a disabled stage
//! passes its traffic straight through. The processing stages decimate
//! ([`Filter`]), hold whole strokes ([`Buffer`]), fit cubic splines with
//! optional tension and scallops ([`Spline`]), clip to a window ([`Clip`])
//! and insert points along long segments ([`Fill`]). The sinks draw through
//! a caller-supplied [`Renderer`] ([`Echo`], [`Display`]), save polylines in
//! memory ([`Save`]) or commit them to a [`Metafile`] ([`Meta`]).
//!
//! # Examples
//!
//! Smooth a stroke and clip it to a window:
//! ```
//! use strokepipe::{ClipParams, Pipeline, Point, Polyline, SplineParams};
//!
//! let mut pipe = Pipeline::new();
//! pipe.enable_spline(SplineParams::new(0.5)).unwrap();
//! pipe.enable_clip(ClipParams::new(0.0, 10.0, 0.0, 10.0)).unwrap();
//! pipe.enable_save();
//!
//! let stroke: Polyline = [(1.0, 1.0), (5.0, 8.0), (14.0, 4.0)]
//!     .into_iter()
//!     .map(Point::from)
//!     .collect();
//! pipe.line(&stroke);
//!
//! let saved = pipe.recall_save();
//! assert_eq!(saved[0].points()[0], Point::new(1.0, 1.0));
//! assert!(saved.iter().flat_map(|l| l.iter()).all(|p| p.x <= 10.0 + 1e-4));
//! ```
//!
//! Draw with your own renderer:
//! ```
//! use strokepipe::{Colour, DisplayParams, LineStyle, Pipeline, Renderer};
//!
//! #[derive(Default)]
//! struct Segments(usize);
//!
//! impl Renderer for Segments {
//!     fn draw_to(&mut self, _x: f32, _y: f32) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut pipe = Pipeline::builder().renderer(Segments::default()).build();
//! pipe.enable_display(DisplayParams::new(Colour(1), LineStyle(0)));
//! pipe.put(0.0, 0.0);
//! pipe.put(1.0, 0.0);
//! pipe.put(1.0, 1.0);
//! pipe.flush();
//! assert_eq!(pipe.renderer().0, 2);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments.
//!
//! With the `serde` feature, vocabulary, parameter and document types can
//! be serialized. The `mint` feature adds conversions to and from the
//! [`mint`] types.
//!
//! [`libm`]: https://docs.rs/libm
//! [`mint`]: https://docs.rs/mint

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(clippy::many_single_char_names, clippy::float_cmp)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("strokepipe requires either the `std` or `libm` feature");

extern crate alloc;

mod buffer;
mod clip;
pub mod common;
mod display;
mod echo;
mod error;
mod fill;
mod filter;
mod graph;
mod meta;
mod metafile;
mod pipeline;
mod point;
mod polyline;
mod rect;
mod renderer;
mod save;
mod spline;
mod stage;
mod vec2;

pub use crate::buffer::*;
pub use crate::clip::*;
pub use crate::display::*;
pub use crate::echo::*;
pub use crate::error::*;
pub use crate::fill::*;
pub use crate::filter::*;
pub use crate::graph::*;
pub use crate::meta::*;
pub use crate::metafile::*;
pub use crate::pipeline::*;
pub use crate::point::*;
pub use crate::polyline::*;
pub use crate::rect::*;
pub use crate::renderer::*;
pub use crate::save::*;
pub use crate::spline::*;
pub use crate::stage::*;
pub use crate::vec2::*;
