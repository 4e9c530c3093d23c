/*!
Fixed-width two's complement integers over packed limbs.

A [`BlockBinary`] is a signed integer of exactly `nbits` bits, stored
as an ordered sequence of unsigned limbs (little-end limb first). The
limb type is any of `u8`, `u16`, `u32`, `u64` via the [`BlockType`]
trait. All arithmetic is exact within the width: addition, subtraction,
and multiplication silently wrap, division truncates toward zero, and
the right shift is arithmetic. Significand arithmetic in
[`BlockTriple`][crate::BlockTriple] is built entirely on this type, so
these contracts are load-bearing for every format in the crate.
*/

mod number;
mod ops;

pub use number::{BlockBinary, BlockType};
