/*!
Posit numbers as described by the 2022 Posit Standard.

A posit is a tapered-precision binary number: a variable-length unary
regime field trades fraction bits for dynamic range, so precision is
highest near `±1` and falls off toward the extremes. The encoding has
exactly two special patterns: all zeros is `0` and `1` followed by
zeros is NaR, the single projective non-real. Negative values are the
two's complement of the positive pattern. Arithmetic never overflows
to NaR or underflows to zero: results saturate at `maxpos` and
`minpos`.

This module implements the encoding with [`Posit`] and the rounding
behavior with [`PositContext`].
*/

mod number;
mod ops;
mod round;

pub use number::{Posit, PositVal};
pub use round::PositContext;
