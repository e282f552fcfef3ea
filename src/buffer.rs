// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hold a whole stroke until it is flushed.

use crate::{Point, Polyline, Stage, StageContext};

/// The buffer stage.
///
/// Nothing is passed on while points arrive. On flush the accumulated
/// stroke is replayed point by point, then the flush itself follows.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    line: Polyline,
}

impl Buffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The points held so far.
    pub fn pending(&self) -> &Polyline {
        &self.line
    }
}

impl Stage for Buffer {
    fn put(&mut self, point: Point, _cx: &mut StageContext<'_>) {
        self.line.push(point);
    }

    fn flush(&mut self, cx: &mut StageContext<'_>) {
        for p in self.line.iter() {
            cx.emit(p);
        }
        self.line.clear();
        cx.flush();
    }
}
