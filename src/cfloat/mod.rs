/*!
Classic floating-point encodings with configurable edge behavior.

A [`Cfloat`] is a fixed-width floating-point number with the bit layout
`sign | exponent | fraction` and an IEEE-754-style bias. Three flags
vary the interpretation of the reserved exponent bands:

  - `subnormals`: the all-zero exponent band holds gradual-underflow
    values; when off, those patterns snap to zero (or `minpos` when
    saturating).
  - `supernormals`: the all-ones exponent band holds an extra binade of
    finite values instead of infinities and NaNs; the single pattern
    `(sign=1, exp=all-ones, frac=0)` remains NaR.
  - `saturating`: overflow clamps to `±maxpos` instead of producing
    infinities, and underflow without subnormals clamps nonzero
    magnitudes to `±minpos`.

This module implements the encoding with [`Cfloat`] and the rounding
behavior with [`CfloatContext`].
*/

mod number;
mod ops;
mod round;

pub use number::{Cfloat, CfloatVal, Exceptions};
pub use round::CfloatContext;
