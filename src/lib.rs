/*!
`bexnum` is a library of bit-exact, parameterized number formats for
research into non-IEEE-754 number systems. Unlike general bignum
libraries such as [Rug](https://docs.rs/rug/latest/rug/) (MPFR), this
library emphasizes faithful modeling of *encodings*: every format is a
fixed-width bit layout with a deterministic decode/round/encode cycle.

Three encoding families are provided:

  - [`Cfloat`][crate::cfloat::Cfloat]: classic floating-point with
    configurable subnormal, supernormal, and saturation behavior,
  - [`Posit`][crate::posit::Posit]: tapered-precision numbers with a
    variable-length regime field and a single NaR encoding,
  - [`Areal`][crate::areal::Areal]: exact-or-open-interval numbers with
    a trailing uncertainty bit.

All arithmetic runs through one working representation, the
[`BlockTriple`][crate::blocktriple::BlockTriple]: a sign/scale/significand
value whose significand is an exact fixed-width integer
([`BlockBinary`][crate::blockbinary::BlockBinary]). Operations are exact
(or round-to-odd with spare digits, for division and square root) in the
triple; rounding to a format happens once, at encode time, from integer
significand bits alone. The same inputs therefore produce the same output
bits on every platform.

The [`verify`] module contains the self-verification harness: drivers
that enumerate every encoding of a configuration (or sample uniformly
above a size cap) and compare each arithmetic result against an MPFR
reference computed at higher precision.
*/

pub mod areal;
pub mod blockbinary;
pub mod blocktriple;
pub mod cfloat;
pub mod error;
pub mod ops;
pub mod posit;
pub mod real;
pub mod round;
pub mod verify;

mod util;

pub use crate::blockbinary::{BlockBinary, BlockType};
pub use crate::blocktriple::{BlockTriple, Split};
pub use crate::error::Error;
pub use crate::real::Real;
pub use crate::round::RoundingContext;
pub use crate::round::RoundingMode;
