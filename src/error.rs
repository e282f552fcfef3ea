// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the pipe.
//!
//! Point and flush traffic never fails: a disabled stage simply drops what
//! it is given. Errors are only reported when enabling a stage with
//! parameters it cannot work with, and when the save stack is pushed or
//! popped past its bounds.

use thiserror::Error;

use crate::Module;

/// Errors that can occur when configuring the pipe.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PipeError {
    /// A stage that samples at a fixed spacing was given a spacing it
    /// cannot step by.
    #[error("{module} resolution must be finite and positive, got {value}")]
    InvalidResolution {
        /// The stage being enabled.
        module: Module,
        /// The rejected resolution.
        value: f32,
    },

    /// The clipping window has an edge that is not finite.
    #[error("clip window edges must be finite")]
    InvalidWindow,

    /// Every level of the save stack is already in use.
    #[error("save stack overflow: all {depth} levels in use")]
    SaveStackOverflow {
        /// The fixed depth of the stack.
        depth: usize,
    },

    /// There is no pushed level to return to.
    #[error("save stack underflow")]
    SaveStackUnderflow,
}

/// Result type for pipe configuration.
pub type PipeResult<T> = core::result::Result<T, PipeError>;
