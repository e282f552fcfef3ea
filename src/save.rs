// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Save strokes in memory as polylines.

use alloc::vec::Vec;

use arrayvec::ArrayVec;

use crate::{PipeError, PipeResult, Point, Polyline, Stage, StageContext};

/// Number of save levels, the current one included.
pub const SAVE_STACK_DEPTH: usize = 5;

/// The save stage.
///
/// Each stroke becomes one polyline of the current level. Callers can
/// [`push`](Save::push) the current level to collect into a fresh one and
/// later [`pop`](Save::pop) back to it.
#[derive(Clone, Debug)]
pub struct Save {
    lines: Vec<Polyline>,
    stack: ArrayVec<Vec<Polyline>, { SAVE_STACK_DEPTH - 1 }>,
    new_line: bool,
}

impl Default for Save {
    fn default() -> Self {
        Save {
            lines: Vec::new(),
            stack: ArrayVec::new(),
            new_line: true,
        }
    }
}

impl Save {
    /// An empty save stage at the bottom level.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines of the current level.
    ///
    /// A stroke still in progress is included as the last line.
    pub fn recall(&self) -> &[Polyline] {
        &self.lines
    }

    /// Take the lines of the current level, leaving it empty.
    pub fn take_lines(&mut self) -> Vec<Polyline> {
        self.new_line = true;
        core::mem::take(&mut self.lines)
    }

    /// Discard the lines of the current level.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.new_line = true;
    }

    /// The current level, counting from 1.
    pub fn depth(&self) -> usize {
        self.stack.len() + 1
    }

    /// Set the current lines aside and start a fresh level.
    pub fn push(&mut self) -> PipeResult<()> {
        if self.stack.is_full() {
            tracing::warn!(depth = SAVE_STACK_DEPTH, "save: stack overflow");
            return Err(PipeError::SaveStackOverflow {
                depth: SAVE_STACK_DEPTH,
            });
        }
        let lines = core::mem::take(&mut self.lines);
        self.stack.push(lines);
        self.new_line = true;
        Ok(())
    }

    /// Discard the current level and return to the one below.
    pub fn pop(&mut self) -> PipeResult<()> {
        let Some(lines) = self.stack.pop() else {
            tracing::warn!("save: stack underflow");
            return Err(PipeError::SaveStackUnderflow);
        };
        self.lines = lines;
        self.new_line = true;
        Ok(())
    }
}

impl Stage for Save {
    fn put(&mut self, point: Point, cx: &mut StageContext<'_>) {
        if self.new_line || self.lines.is_empty() {
            self.new_line = false;
            self.lines.push(Polyline::new());
        }
        if let Some(line) = self.lines.last_mut() {
            line.push(point);
        }
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
    use crate::stage::testing::{pts, run_stroke};

    #[test]
    fn one_line_per_stroke() {
        let mut save = Save::new();
        run_stroke(&mut save, &pts(&[(0.0, 0.0), (1.0, 0.0)]));
        run_stroke(&mut save, &[]);
        run_stroke(&mut save, &pts(&[(2.0, 2.0)]));
        let lines = save.recall();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].points(), pts(&[(0.0, 0.0), (1.0, 0.0)]).as_slice());
        assert_eq!(lines[1].points(), pts(&[(2.0, 2.0)]).as_slice());
    }

    #[test]
    fn push_and_pop_restore_counts() {
        let mut save = Save::new();
        let mut counts = Vec::new();
        for level in 0..SAVE_STACK_DEPTH {
            for i in 0..=level {
                run_stroke(&mut save, &pts(&[(i as f32, level as f32)]));
            }
            counts.push(save.recall().len());
            if level + 1 < SAVE_STACK_DEPTH {
                save.push().unwrap();
                assert!(save.recall().is_empty());
            }
        }
        assert_eq!(save.depth(), SAVE_STACK_DEPTH);

        let before = save.recall().to_vec();
        assert_eq!(
            save.push(),
            Err(PipeError::SaveStackOverflow {
                depth: SAVE_STACK_DEPTH
            })
        );
        assert_eq!(save.recall(), before.as_slice());

        for level in (0..SAVE_STACK_DEPTH).rev() {
            assert_eq!(save.recall().len(), counts[level]);
            if level > 0 {
                save.pop().unwrap();
            }
        }
        assert_eq!(save.pop(), Err(PipeError::SaveStackUnderflow));
        assert_eq!(save.depth(), 1);
        assert_eq!(save.recall().len(), 1);
    }

    #[test]
    fn take_lines_empties_level() {
        let mut save = Save::new();
        run_stroke(&mut save, &pts(&[(0.0, 0.0)]));
        assert_eq!(save.take_lines().len(), 1);
        assert!(save.recall().is_empty());
    }
}
