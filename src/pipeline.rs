// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pipe itself: the graph, every stage and the renderer.

use alloc::vec::Vec;

use crate::{
    Buffer, Clip, ClipParams, Display, DisplayParams, Echo, EchoParams, Emitted, Event, Fill,
    FillParams, Filter, FilterParams, Graph, Meta, MetaParams, Metafile, Module, NoRenderer,
    PipeError, PipeResult, Point, Polyline, Renderer, Save, Spline, SplineParams, Stage,
    StageContext,
};

/// Check a sampling resolution before a stage steps by it.
fn check_resolution(module: Module, value: f32) -> PipeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PipeError::InvalidResolution { module, value })
    }
}

/// Every stage instance. A stage with parameters exists only while enabled.
#[derive(Debug, Default)]
struct Stages {
    filter: Option<Filter>,
    buffer: Buffer,
    spline: Option<Spline>,
    clip: Option<Clip>,
    fill: Option<Fill>,
    echo: Option<Echo>,
    display: Option<Display>,
    save: Save,
    meta: Option<Meta>,
}

impl Stages {
    fn get_mut(&mut self, module: Module) -> Option<&mut dyn Stage> {
        match module {
            Module::Pipe => None,
            Module::Filter => self.filter.as_mut().map(|s| s as &mut dyn Stage),
            Module::Buffer => Some(&mut self.buffer),
            Module::Spline => self.spline.as_mut().map(|s| s as &mut dyn Stage),
            Module::Clip => self.clip.as_mut().map(|s| s as &mut dyn Stage),
            Module::Fill => self.fill.as_mut().map(|s| s as &mut dyn Stage),
            Module::Echo => self.echo.as_mut().map(|s| s as &mut dyn Stage),
            Module::Display => self.display.as_mut().map(|s| s as &mut dyn Stage),
            Module::Save => Some(&mut self.save),
            Module::Meta => self.meta.as_mut().map(|s| s as &mut dyn Stage),
        }
    }
}

/// A stroke-processing pipe.
///
/// Points pushed with [`put`](Pipeline::put) travel down the fixed
/// [`Graph`], through whichever stages are enabled, and a
/// [`flush`](Pipeline::flush) ends the stroke. Every call
/// runs to completion, including all downstream fan-out, before it
/// returns; for a node with two successors, the first successor's whole
/// subtree sees each event before the second.
///
/// A fresh pipe has only the root enabled, so traffic goes nowhere until a
/// sink is enabled.
///
/// ```
/// use strokepipe::{ClipParams, Pipeline, Point};
///
/// let mut pipe = Pipeline::new();
/// pipe.enable_clip(ClipParams::new(0.0, 10.0, 0.0, 10.0)).unwrap();
/// pipe.enable_save();
/// pipe.push_line(&[Point::new(5.0, 5.0), Point::new(15.0, 5.0)]);
/// pipe.flush();
/// assert_eq!(pipe.recall_save()[0].points(), [Point::new(5.0, 5.0), Point::new(10.0, 5.0)]);
/// ```
#[derive(Debug)]
pub struct Pipeline<R = NoRenderer> {
    graph: Graph,
    stages: Stages,
    renderer: R,
}

/// Builder for a [`Pipeline`].
#[derive(Debug)]
pub struct PipelineBuilder<R = NoRenderer> {
    renderer: R,
}

impl PipelineBuilder<NoRenderer> {
    /// A builder for a pipe that draws nothing.
    pub fn new() -> Self {
        PipelineBuilder {
            renderer: NoRenderer,
        }
    }
}

impl Default for PipelineBuilder<NoRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> PipelineBuilder<R> {
    /// Builder method for the renderer the echo and display stages draw with.
    pub fn renderer<S: Renderer>(self, renderer: S) -> PipelineBuilder<S> {
        PipelineBuilder { renderer }
    }

    /// Build the pipe, with only the root enabled.
    pub fn build(self) -> Pipeline<R> {
        Pipeline {
            graph: Graph::standard(),
            stages: Stages::default(),
            renderer: self.renderer,
        }
    }
}

impl Pipeline<NoRenderer> {
    /// A pipe that draws nothing, with only the root enabled.
    pub fn new() -> Self {
        PipelineBuilder::new().build()
    }

    /// Start building a pipe.
    pub fn builder() -> PipelineBuilder<NoRenderer> {
        PipelineBuilder::new()
    }
}

impl Default for Pipeline<NoRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> Pipeline<R> {
    /// The dispatch graph and its enabled flags.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Is `module` consuming traffic itself?
    pub fn is_enabled(&self, module: Module) -> bool {
        self.graph.is_enabled(module)
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Give up the pipe, returning its renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    // ── Traffic ──

    /// Turn every stage off, then flush once through the empty pipe.
    ///
    /// Only the enabled flags change: saved lines and the meta document
    /// are kept until their stage is next enabled or disabled.
    pub fn reset(&mut self) {
        tracing::debug!("pipe: reset");
        for module in Module::ALL {
            self.graph.disable(module);
        }
        self.graph.enable(Module::Pipe);
        self.dispatch(Module::Pipe, Event::Flush);
    }

    /// Push the next point of the current stroke.
    pub fn put(&mut self, x: f32, y: f32) {
        self.point(Point::new(x, y));
    }

    /// Push the next point of the current stroke.
    pub fn point(&mut self, point: Point) {
        self.dispatch(Module::Pipe, Event::Point(point));
    }

    /// End the current stroke (pen up).
    pub fn flush(&mut self) {
        self.dispatch(Module::Pipe, Event::Flush);
    }

    /// Push `points` without ending the stroke.
    pub fn push_line(&mut self, points: &[Point]) {
        for &p in points {
            self.point(p);
        }
    }

    /// Push a whole stroke and end it.
    pub fn line(&mut self, line: &Polyline) {
        self.push_line(line.points());
        self.flush();
    }

    /// Deliver `event` to `module`.
    ///
    /// An enabled stage handles it and whatever the stage emits goes on to
    /// the successors, event by event. A disabled node hands the event
    /// straight to its successors.
    fn dispatch(&mut self, module: Module, event: Event) {
        let mut out = Emitted::new();
        let handled = self.graph.is_enabled(module)
            && match self.stages.get_mut(module) {
                Some(stage) => {
                    let mut cx = StageContext::new(&mut out, &mut self.renderer);
                    match event {
                        Event::Point(p) => stage.put(p, &mut cx),
                        Event::Flush => stage.flush(&mut cx),
                    }
                    true
                }
                None => false,
            };
        if !handled {
            out.push(event);
        }

        let node = *self.graph.node(module);
        for e in out {
            for next in node.successors() {
                self.dispatch(next, e);
            }
        }
    }

    // ── Stage configuration ──

    /// Start decimating strokes.
    pub fn enable_filter(&mut self, params: FilterParams) {
        tracing::debug!(?params, "pipe: enable filter");
        self.stages.filter = Some(Filter::new(params));
        self.graph.enable(Module::Filter);
    }

    /// Stop decimating strokes.
    pub fn disable_filter(&mut self) {
        tracing::debug!("pipe: disable filter");
        self.graph.disable(Module::Filter);
        self.stages.filter = None;
    }

    /// Start holding each stroke until it is flushed.
    pub fn enable_buffer(&mut self) {
        tracing::debug!("pipe: enable buffer");
        self.stages.buffer = Buffer::new();
        self.graph.enable(Module::Buffer);
    }

    /// Stop buffering; any held points are dropped.
    pub fn disable_buffer(&mut self) {
        tracing::debug!("pipe: disable buffer");
        self.graph.disable(Module::Buffer);
        self.stages.buffer = Buffer::new();
    }

    /// Start fitting splines.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::InvalidResolution`] if the resolution is not
    /// finite and positive; the spline is then left disabled.
    pub fn enable_spline(&mut self, params: SplineParams) -> PipeResult<()> {
        if let Err(e) = check_resolution(Module::Spline, params.resolution) {
            self.disable_spline();
            return Err(e);
        }
        tracing::debug!(?params, "pipe: enable spline");
        self.stages.spline = Some(Spline::new(params));
        self.graph.enable(Module::Spline);
        Ok(())
    }

    /// Stop fitting splines.
    pub fn disable_spline(&mut self) {
        tracing::debug!("pipe: disable spline");
        self.graph.disable(Module::Spline);
        self.stages.spline = None;
    }

    /// Start clipping.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::InvalidWindow`] if any window edge is not
    /// finite; clipping is then left disabled.
    pub fn enable_clip(&mut self, params: ClipParams) -> PipeResult<()> {
        if !params.window.is_finite() {
            self.disable_clip();
            return Err(PipeError::InvalidWindow);
        }
        tracing::debug!(?params, "pipe: enable clip");
        // Accept hand-built windows with reversed edges.
        let params = ClipParams {
            window: params.window.abs(),
            ..params
        };
        self.stages.clip = Some(Clip::new(params));
        self.graph.enable(Module::Clip);
        Ok(())
    }

    /// Stop clipping.
    pub fn disable_clip(&mut self) {
        tracing::debug!("pipe: disable clip");
        self.graph.disable(Module::Clip);
        self.stages.clip = None;
    }

    /// Start filling long segments.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::InvalidResolution`] if the resolution is not
    /// finite and positive; fill is then left disabled.
    pub fn enable_fill(&mut self, params: FillParams) -> PipeResult<()> {
        if let Err(e) = check_resolution(Module::Fill, params.resolution) {
            self.disable_fill();
            return Err(e);
        }
        tracing::debug!(?params, "pipe: enable fill");
        self.stages.fill = Some(Fill::new(params));
        self.graph.enable(Module::Fill);
        Ok(())
    }

    /// Stop filling long segments.
    pub fn disable_fill(&mut self) {
        tracing::debug!("pipe: disable fill");
        self.graph.disable(Module::Fill);
        self.stages.fill = None;
    }

    /// Start echoing points as markers.
    pub fn enable_echo(&mut self, params: EchoParams) {
        tracing::debug!(?params, "pipe: enable echo");
        self.stages.echo = Some(Echo::new(params));
        self.graph.enable(Module::Echo);
    }

    /// Stop echoing points.
    pub fn disable_echo(&mut self) {
        tracing::debug!("pipe: disable echo");
        self.graph.disable(Module::Echo);
        self.stages.echo = None;
    }

    /// Start drawing strokes.
    pub fn enable_display(&mut self, params: DisplayParams) {
        tracing::debug!(?params, "pipe: enable display");
        self.stages.display = Some(Display::new(params));
        self.graph.enable(Module::Display);
    }

    /// Stop drawing strokes.
    pub fn disable_display(&mut self) {
        tracing::debug!("pipe: disable display");
        self.graph.disable(Module::Display);
        self.stages.display = None;
    }

    /// Start saving strokes, discarding the lines of the current level.
    pub fn enable_save(&mut self) {
        tracing::debug!("pipe: enable save");
        self.stages.save.clear();
        self.graph.enable(Module::Save);
    }

    /// Stop saving strokes, discarding the lines of the current level.
    pub fn disable_save(&mut self) {
        tracing::debug!("pipe: disable save");
        self.graph.disable(Module::Save);
        self.stages.save.clear();
    }

    /// The saved lines of the current level.
    pub fn recall_save(&self) -> &[Polyline] {
        self.stages.save.recall()
    }

    /// Take the saved lines of the current level, leaving it empty.
    pub fn take_saved_lines(&mut self) -> Vec<Polyline> {
        self.stages.save.take_lines()
    }

    /// Set the saved lines aside and save into a fresh level.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::SaveStackOverflow`] if every level is in use.
    pub fn push_save(&mut self) -> PipeResult<()> {
        self.stages.save.push()
    }

    /// Discard the current level of saved lines and return to the one below.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::SaveStackUnderflow`] at the bottom level.
    pub fn pop_save(&mut self) -> PipeResult<()> {
        self.stages.save.pop()
    }

    /// The current save level, counting from 1.
    pub fn save_depth(&self) -> usize {
        self.stages.save.depth()
    }

    /// Start committing strokes to `document`.
    ///
    /// Returns the document previously in use, if any.
    pub fn enable_meta(&mut self, document: Metafile, params: MetaParams) -> Option<Metafile> {
        tracing::debug!(?params, "pipe: enable meta");
        let previous = self.stages.meta.take().map(Meta::into_document);
        self.stages.meta = Some(Meta::new(document, params));
        self.graph.enable(Module::Meta);
        previous
    }

    /// Stop committing strokes, returning the document.
    pub fn disable_meta(&mut self) -> Option<Metafile> {
        tracing::debug!("pipe: disable meta");
        self.graph.disable(Module::Meta);
        self.stages.meta.take().map(Meta::into_document)
    }

    /// The document strokes are committed to.
    pub fn meta_document(&self) -> Option<&Metafile> {
        self.stages.meta.as_ref().map(Meta::document)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::stage::testing::pts;

    fn saved(pipe: &Pipeline) -> Vec<Vec<Point>> {
        pipe.recall_save().iter().map(|l| l.points().to_vec()).collect()
    }

    #[test]
    fn fresh_pipe_has_only_root() {
        let pipe = Pipeline::new();
        for m in Module::ALL {
            assert_eq!(pipe.is_enabled(m), m == Module::Pipe);
        }
    }

    #[test]
    fn disabled_stages_are_transparent() {
        let mut pipe = Pipeline::new();
        pipe.enable_save();
        pipe.line(&Polyline::from_points(pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])));
        assert_eq!(saved(&pipe), [pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])]);
    }

    #[test]
    fn empty_line_is_only_a_flush() {
        let mut pipe = Pipeline::new();
        pipe.enable_save();
        pipe.line(&Polyline::new());
        assert!(pipe.recall_save().is_empty());
    }

    #[test]
    fn invalid_resolution_leaves_stage_disabled() {
        let mut pipe = Pipeline::new();
        pipe.enable_spline(SplineParams::new(1.0)).unwrap();
        assert_eq!(
            pipe.enable_spline(SplineParams::new(0.0)),
            Err(PipeError::InvalidResolution {
                module: Module::Spline,
                value: 0.0
            })
        );
        assert!(!pipe.is_enabled(Module::Spline));
        assert!(pipe.enable_fill(FillParams::new(f32::NAN)).is_err());
        assert!(!pipe.is_enabled(Module::Fill));
    }

    #[test]
    fn invalid_window_is_rejected() {
        let mut pipe = Pipeline::new();
        let params = ClipParams::new(0.0, f32::INFINITY, 0.0, 1.0);
        assert_eq!(pipe.enable_clip(params), Err(PipeError::InvalidWindow));
        assert!(!pipe.is_enabled(Module::Clip));
    }

    #[test]
    fn reset_keeps_sink_results() {
        let mut pipe = Pipeline::new();
        pipe.enable_save();
        pipe.enable_meta(Metafile::new(), MetaParams::default());
        pipe.push_line(&pts(&[(0.0, 0.0), (1.0, 0.0)]));
        // The pending stroke ends at the save stage, which is now disabled.
        pipe.reset();
        assert!(!pipe.is_enabled(Module::Save));
        assert!(!pipe.is_enabled(Module::Meta));
        assert_eq!(saved(&pipe).len(), 1);
        assert_eq!(pipe.meta_document().map(Metafile::len), Some(0));

        pipe.put(5.0, 5.0);
        pipe.flush();
        assert_eq!(saved(&pipe).len(), 1);
        assert_eq!(pipe.disable_meta().map(|d| d.len()), Some(0));
    }

    #[test]
    fn enable_meta_returns_previous_document() {
        let mut pipe = Pipeline::new();
        assert!(pipe.enable_meta(Metafile::new(), MetaParams::default()).is_none());
        pipe.line(&Polyline::from_points(pts(&[(0.0, 0.0)])));
        let old = pipe.enable_meta(Metafile::new(), MetaParams::default());
        assert_eq!(old.map(|d| d.len()), Some(1));
        assert_eq!(pipe.meta_document().map(Metafile::len), Some(0));
    }

    #[test]
    fn save_stack_through_pipe() {
        let mut pipe = Pipeline::new();
        pipe.enable_save();
        pipe.line(&Polyline::from_points(pts(&[(0.0, 0.0)])));
        pipe.push_save().unwrap();
        assert_eq!(pipe.save_depth(), 2);
        pipe.line(&Polyline::from_points(pts(&[(1.0, 1.0)])));
        pipe.line(&Polyline::from_points(pts(&[(2.0, 2.0)])));
        assert_eq!(pipe.recall_save().len(), 2);
        pipe.pop_save().unwrap();
        assert_eq!(saved(&pipe), [pts(&[(0.0, 0.0)])]);
        assert_eq!(pipe.take_saved_lines().len(), 1);
        assert!(pipe.recall_save().is_empty());
    }

    #[test]
    fn fan_out_reaches_both_sinks() {
        let mut pipe = Pipeline::new();
        pipe.enable_save();
        pipe.enable_meta(Metafile::new(), MetaParams::new("e", "f", "l"));
        let input = pts(&[(0.0, 0.0), (3.0, 4.0)]);
        pipe.push_line(&input);
        pipe.flush();
        assert_eq!(saved(&pipe), [input.clone()]);
        let doc = pipe.disable_meta().unwrap_or_default();
        assert_eq!(doc.items()[0].curve.line.points(), input.as_slice());
    }
}
