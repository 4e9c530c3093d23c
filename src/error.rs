/*!
Error values shared across the crate.

Arithmetic never fails through this type: operations on encoded numbers
absorb problems into the format's NaN/NaR value and record exception
flags on the result (or, via the `checked_*` context methods, surface
them as `Err`). [`Error`] covers the remaining failure classes: bit
indexing, integer division, malformed raw patterns, and invalid format
configurations.
*/

use std::fmt;

/// Failure classes of the crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A bit index at or above the width of the value it was applied to.
    IndexOutOfRange { index: usize, nbits: usize },
    /// Integer division or remainder with a zero divisor.
    DivideByZero,
    /// An arithmetic result exceeded the format's range.
    /// Only surfaced by the `checked_*` operations; the plain operations
    /// return the saturated or non-finite encoding instead.
    ArithmeticOverflow,
    /// An operation produced no meaningful numerical result.
    /// Only surfaced by the `checked_*` operations.
    InvalidOperation,
    /// A raw bit pattern that does not fit the target format.
    UnexpectedEncoding,
    /// Format parameters that violate the constraints of the encoding,
    /// e.g. an exponent field wider than `nbits - 2`.
    ConfigurationInvalid(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, nbits } => {
                write!(f, "bit index {} out of range for width {}", index, nbits)
            }
            Error::DivideByZero => write!(f, "integer division by zero"),
            Error::ArithmeticOverflow => write!(f, "arithmetic overflow"),
            Error::InvalidOperation => write!(f, "invalid operation"),
            Error::UnexpectedEncoding => write!(f, "raw pattern does not fit the format"),
            Error::ConfigurationInvalid(what) => write!(f, "invalid configuration: {}", what),
        }
    }
}

impl std::error::Error for Error {}
