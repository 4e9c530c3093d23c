/*!
The universal numeric trait.

Every number format in this crate can be viewed as a finite-precision
value in scientific notation, `(-1)^s * c * b^exp`, where `s` is the
sign, `c` the non-negative integer significand, `b` the radix, and
`exp` the exponent. Formats may additionally encode non-real values,
notably infinities and NaN. [`Real`] captures this shared view; the
rounding machinery ([`RoundingContext`][crate::RoundingContext],
[`Split`][crate::Split]) operates on it exclusively, so any type
implementing [`Real`] can be rounded into any format.
*/

use rug::Integer;

/// The "digital number" view of a (projective) real number format.
///
/// See the [module documentation][self] for the interpretation of the
/// scientific-notation accessors. The classification predicates below
/// partition every value of an implementing type into exactly one of:
/// zero, finite non-zero, infinite, or not-a-real.
pub trait Real {
    /// Returns the radix of the format. Must be strictly positive;
    /// every format in this crate is binary.
    fn radix() -> usize;

    /// The sign bit. For values without a meaningful sign (e.g. NaN in
    /// some formats), the result is `false`.
    fn sign(&self) -> bool;

    /// Viewing this number as `(-1)^s * c * b^exp` where `c` is an
    /// integer, returns `exp`, the weight of the least significant
    /// digit. Only well-defined for finite, non-zero numbers.
    fn exp(&self) -> Option<isize>;

    /// Viewing this number as `(-1)^s * f * b^e` where `f` is a binary
    /// fraction in `[1, 2)`, returns `e`, the weight of the leading
    /// digit. Only well-defined for finite, non-zero numbers.
    fn e(&self) -> Option<isize>;

    /// The least absolute digit position: the place immediately below
    /// the least significant digit of the significand. Always equal to
    /// `self.exp() - 1` when defined.
    fn n(&self) -> Option<isize>;

    /// The unsigned integer significand `c`.
    /// Only well-defined for finite numbers; zero values yield `Some(0)`.
    fn c(&self) -> Option<Integer>;

    /// The signed significand `(-1)^s * c`.
    fn m(&self) -> Option<Integer> {
        self.c().map(|c| if self.sign() { -c } else { c })
    }

    /// Precision of the significand: the number of binary digits needed
    /// to encode `c`. `None` for non-finite values.
    fn prec(&self) -> Option<usize>;

    /// Returns true if this value is not a real number (infinity or NaN).
    fn is_nar(&self) -> bool;

    /// Returns true if this value is a finite number (zero included).
    fn is_finite(&self) -> bool;

    /// Returns true if this value is infinite.
    fn is_infinite(&self) -> bool;

    /// Returns true if this value is zero (of either sign).
    fn is_zero(&self) -> bool;

    /// Returns true if this value is negative. Not well-defined for
    /// zeros (the sign bit of a zero does not order it) or NaN.
    fn is_negative(&self) -> Option<bool>;

    /// Returns true if this value represents a numerical quantity:
    /// a finite number or a limiting (infinite) value, but not NaN.
    fn is_numerical(&self) -> bool;
}
