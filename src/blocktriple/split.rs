use rug::Integer;

use crate::round::{RoundingDirection, RoundingMode};
use crate::util::bitmask;
use crate::Real;

use super::number::BlockTriple;

/// Result of splitting a [`Real`] at binary digit `n`.
///
/// The split is exact: the high part holds every significant digit
/// above position `n`, the low part everything at or below, and their
/// sum is the input. The low part yields the rounding bits — round
/// (the digit at `n`) and sticky (anything below) — that drive the
/// increment decision in [`round_finalize`].
#[derive(Clone, Debug)]
pub struct Split {
    high: BlockTriple,
    low: BlockTriple,
    max_p: Option<usize>,
    n: isize,
}

impl Split {
    fn split<T: Real>(num: &T, n: isize) -> (BlockTriple, BlockTriple) {
        let s = num.sign();
        if num.is_zero() {
            (BlockTriple::Zero(s), BlockTriple::Zero(s))
        } else {
            let e = num.e().unwrap();
            let exp = num.exp().unwrap();
            let c = num.c().unwrap();

            if n >= e {
                // split point above the significant digits
                (BlockTriple::Zero(s), BlockTriple::from_parts(s, exp, &c))
            } else if n < exp {
                // split point below the significant digits
                (BlockTriple::from_parts(s, exp, &c), BlockTriple::Zero(s))
            } else {
                // split point within the significant digits
                let offset = (n - (exp - 1)) as usize;
                let high = Integer::from(&c >> (offset as u32));
                let low = c & bitmask(offset);
                (
                    BlockTriple::from_parts(s, n + 1, &high),
                    BlockTriple::from_parts(s, exp, &low),
                )
            }
        }
    }

    /// Splits `num` at digit `n`, remembering the precision budget
    /// `max_p` of the caller for the carry fix-up after an increment.
    pub fn new<T: Real>(num: &T, max_p: Option<usize>, n: isize) -> Self {
        assert!(!num.is_nar(), "can only split finite values");
        let (high, low) = Self::split(num, n);
        Self { high, low, max_p, n }
    }

    /// The truncated (high) part of the split.
    pub fn num(&self) -> &BlockTriple {
        &self.high
    }

    /// The lost (low) part of the split.
    pub fn lost(&self) -> &BlockTriple {
        &self.low
    }

    /// The precision budget of the split, if any.
    pub fn max_p(&self) -> Option<usize> {
        self.max_p
    }

    /// The absolute digit of the split.
    pub fn n(&self) -> isize {
        self.n
    }

    /// Extracts the round and sticky bits from the lost digits.
    pub fn rs(&self) -> (bool, bool) {
        let (half, lower) = Self::split(&self.low, self.n - 1);
        (!half.is_zero(), !lower.is_zero())
    }

    /// Extracts the guard, round, and sticky bits from the lost digits.
    pub fn rgs(&self) -> (bool, bool, bool) {
        let (half, lower) = Self::split(&self.low, self.n - 1);
        let (quarter, lower) = Self::split(&lower, self.n - 2);
        (!half.is_zero(), !quarter.is_zero(), !lower.is_zero())
    }
}

/// Given the truncated significand and the rounding bits, should the
/// magnitude be incremented to produce the rounded result?
fn round_increment(
    sign: bool,
    c: &Integer,
    half_bit: bool,
    sticky_bit: bool,
    rm: RoundingMode,
) -> bool {
    let (is_nearest, rd) = rm.to_direction(sign);
    match (is_nearest, half_bit, sticky_bit, rd) {
        // exact, nothing to do
        (_, false, false, _) => false,
        // nearest, below the halfway point
        (true, false, _, _) => false,
        // nearest, above the halfway point
        (true, true, true, _) => true,
        // nearest, exactly halfway: direction breaks the tie
        (true, true, false, RoundingDirection::ToZero) => false,
        (true, true, false, RoundingDirection::AwayZero) => true,
        (true, true, false, RoundingDirection::ToEven) => c.is_odd(),
        (true, true, false, RoundingDirection::ToOdd) => c.is_even(),
        // directed and inexact
        (false, _, _, RoundingDirection::ToZero) => false,
        (false, _, _, RoundingDirection::AwayZero) => true,
        (false, _, _, RoundingDirection::ToEven) => c.is_odd(),
        (false, _, _, RoundingDirection::ToOdd) => c.is_even(),
    }
}

/// Finishes a rounding: takes the truncated part of a [`Split`] and
/// possibly increments it, shifting one digit down when the increment
/// outgrows the precision budget. The result is a triple with
/// unbounded exponent; format contexts apply their own range rules
/// afterwards.
pub fn round_finalize(split: &Split, rm: RoundingMode) -> BlockTriple {
    let s = split.num().sign();
    let mut exp = split.n() + 1;
    let mut c = split.num().c().unwrap_or_default();

    let (half_bit, sticky_bit) = split.rs();

    if round_increment(s, &c, half_bit, sticky_bit, rm) {
        c += 1;
        if let Some(max_p) = split.max_p() {
            let p = c.significant_bits() as usize;
            if p > max_p {
                // carried past the precision budget: drop one digit
                c >>= 1;
                exp += 1;
            }
        }
    }

    BlockTriple::from_parts(s, exp, &c)
}
