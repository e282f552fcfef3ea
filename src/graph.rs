// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dispatch graph connecting the pipe stages.
//!
//! The stages are wired in a fixed directed acyclic graph:
//!
//! ```text
//!   pipe ── filter ── buffer ─┬─ echo
//!                             └─ spline ─┬─ display
//!                                        └─ clip ── fill ─┬─ save
//!                                                         └─ meta
//! ```
//!
//! Only participation changes at run time. A disabled node is transparent:
//! whatever reaches it is handed straight to its successors.

use core::fmt;

/// Identifies one node of the pipe.
///
/// The variants are listed in dispatch order, so every edge of the graph
/// points from a lower to a higher index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Module {
    /// The root, where callers push points.
    Pipe,
    /// Arc-length and turn-angle decimation.
    Filter,
    /// Hold a whole stroke until it is flushed.
    Buffer,
    /// Parametric cubic spline fitting.
    Spline,
    /// Clipping to a rectangular window.
    Clip,
    /// Insertion of points along long segments.
    Fill,
    /// Echo each point as a marker.
    Echo,
    /// Draw the stroke.
    Display,
    /// Save strokes as polylines.
    Save,
    /// Commit strokes to a metafile.
    Meta,
}

impl Module {
    /// The number of nodes in the pipe.
    pub const COUNT: usize = 10;

    /// Every node, in dispatch order.
    pub const ALL: [Module; Module::COUNT] = [
        Module::Pipe,
        Module::Filter,
        Module::Buffer,
        Module::Spline,
        Module::Clip,
        Module::Fill,
        Module::Echo,
        Module::Display,
        Module::Save,
        Module::Meta,
    ];

    /// Index of this node in [`Module::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case name of this node.
    pub const fn name(self) -> &'static str {
        match self {
            Module::Pipe => "pipe",
            Module::Filter => "filter",
            Module::Buffer => "buffer",
            Module::Spline => "spline",
            Module::Clip => "clip",
            Module::Fill => "fill",
            Module::Echo => "echo",
            Module::Display => "display",
            Module::Save => "save",
            Module::Meta => "meta",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node's presence in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipeNode {
    enabled: bool,
    next: [Option<Module>; 2],
}

impl PipeNode {
    const fn new(enabled: bool, next1: Option<Module>, next2: Option<Module>) -> Self {
        PipeNode {
            enabled,
            next: [next1, next2],
        }
    }

    /// Is this node consuming traffic itself?
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The successors, in dispatch order.
    #[inline]
    pub fn successors(&self) -> impl Iterator<Item = Module> + '_ {
        self.next.iter().flatten().copied()
    }
}

/// The fixed wiring of the pipe, plus each node's enabled flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    nodes: [PipeNode; Module::COUNT],
}

impl Graph {
    /// The standard wiring, with only the root enabled.
    pub fn standard() -> Self {
        use Module::{Buffer, Clip, Display, Echo, Filter, Fill, Meta, Save, Spline};

        // Sinks first, so each node is defined before anything that points at it.
        let meta = PipeNode::new(false, None, None);
        let save = PipeNode::new(false, None, None);
        let display = PipeNode::new(false, None, None);
        let echo = PipeNode::new(false, None, None);
        let fill = PipeNode::new(false, Some(Save), Some(Meta));
        let clip = PipeNode::new(false, Some(Fill), None);
        let spline = PipeNode::new(false, Some(Display), Some(Clip));
        let buffer = PipeNode::new(false, Some(Echo), Some(Spline));
        let filter = PipeNode::new(false, Some(Buffer), None);
        let pipe = PipeNode::new(true, Some(Filter), None);

        Graph {
            nodes: [
                pipe, filter, buffer, spline, clip, fill, echo, display, save, meta,
            ],
        }
    }

    /// The node for `module`.
    #[inline]
    pub fn node(&self, module: Module) -> &PipeNode {
        &self.nodes[module.index()]
    }

    /// Set the enabled flag only.
    ///
    /// This does not touch the stage's own state; use the `enable_*` methods
    /// on [`Pipeline`](crate::Pipeline) to (re)initialize a stage.
    #[inline]
    pub fn enable(&mut self, module: Module) {
        self.nodes[module.index()].enabled = true;
    }

    /// Clear the enabled flag only.
    #[inline]
    pub fn disable(&mut self, module: Module) {
        self.nodes[module.index()].enabled = false;
    }

    /// Is `module` consuming traffic itself?
    #[inline]
    pub fn is_enabled(&self, module: Module) -> bool {
        self.node(module).enabled
    }

    /// The successors of `module`, in dispatch order.
    #[inline]
    pub fn successors(&self, module: Module) -> impl Iterator<Item = Module> + '_ {
        self.node(module).successors()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn standard_wiring() {
        let graph = Graph::standard();
        let next = |m| graph.successors(m).collect::<Vec<_>>();
        assert_eq!(next(Module::Pipe), [Module::Filter]);
        assert_eq!(next(Module::Filter), [Module::Buffer]);
        assert_eq!(next(Module::Buffer), [Module::Echo, Module::Spline]);
        assert_eq!(next(Module::Spline), [Module::Display, Module::Clip]);
        assert_eq!(next(Module::Clip), [Module::Fill]);
        assert_eq!(next(Module::Fill), [Module::Save, Module::Meta]);
        for sink in [Module::Echo, Module::Display, Module::Save, Module::Meta] {
            assert!(next(sink).is_empty());
        }
    }

    #[test]
    fn edges_point_downstream() {
        let graph = Graph::standard();
        for m in Module::ALL {
            for n in graph.successors(m) {
                assert!(n > m, "{m} -> {n} points upstream");
            }
        }
    }

    #[test]
    fn only_root_enabled_initially() {
        let graph = Graph::standard();
        for m in Module::ALL {
            assert_eq!(graph.is_enabled(m), m == Module::Pipe);
        }
    }

    #[test]
    fn flag_setters_touch_only_the_flag() {
        let mut graph = Graph::standard();
        graph.enable(Module::Clip);
        assert!(graph.is_enabled(Module::Clip));
        graph.disable(Module::Clip);
        assert_eq!(graph, Graph::standard());
    }

    #[test]
    fn index_matches_order() {
        for (i, m) in Module::ALL.into_iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }
}
