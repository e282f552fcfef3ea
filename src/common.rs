// Copyright 2018 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

#![allow(missing_docs)]

/// Defines a trait that chooses between libstd or libm implementations of float methods.
///
/// The pipe works in single precision throughout, so only `f32` is covered.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lfname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f32 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lfname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("strokepipe requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabsf;
    fn atan2(self, other: Self) -> Self => atan2f;
    fn ceil(self) -> Self => ceilf;
    fn exp(self) -> Self => expf;
    fn hypot(self, other: Self) -> Self => hypotf;
    fn sin(self) -> Self => sinf;
}

/// Relative tolerance below which a chord is too short to have a direction.
///
/// The tolerance scales with the magnitude of the coordinates so that
/// single-precision noise far from the origin is not read as a turn.
pub const DIRECTION_EPSILON: f32 = 1e-5;

/// Approximate equality for single-precision values.
///
/// Both an absolute and a relative tolerance are applied, as pipe output
/// is computed from coordinates of arbitrary magnitude.
#[inline]
pub fn approx_eq(a: f32, b: f32, tolerance: f32) -> bool {
    let diff = (a - b).abs();
    diff <= tolerance || diff <= tolerance * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::approx_eq;

    #[test]
    fn approx_eq_absolute_and_relative() {
        assert!(approx_eq(1.0, 1.0 + 1e-7, 1e-6));
        assert!(!approx_eq(1.0, 1.1, 1e-6));
        // Relative tolerance dominates for large magnitudes.
        assert!(approx_eq(1.0e6, 1.0e6 + 0.5, 1e-6));
        assert!(!approx_eq(0.0, 1e-3, 1e-6));
    }
}
