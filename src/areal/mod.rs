/*!
Exact-or-interval numbers with a trailing uncertainty bit.

An [`Areal`] is a floating-point encoding `sign | exponent | fraction`
followed by a single **ubit** at position 0. With the ubit clear the
encoding *is* the exact value; with the ubit set it is the open
interval between that value and the next exact value away from zero.
Assignment from a real number is therefore never a nearest-rounding:
it truncates toward zero on the format grid and marks any inexactness
in the ubit, so the chosen encoding always contains the assigned
number.

The numeric reading of an interval encoding (ordering, conversion,
arithmetic operands) is its midpoint, which keeps
`from_f64(to_f64(x)) == x` for every encoding.

This module implements the encoding with [`Areal`] and the assignment
behavior with [`ArealContext`].
*/

mod number;
mod ops;
mod round;

pub use number::{Areal, ArealVal};
pub use round::ArealContext;
