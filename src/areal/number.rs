use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitAnd, BitOr};

use num_traits::Zero;
use rug::Integer;

use crate::areal::ArealContext;
use crate::blocktriple::BlockTriple;
use crate::util::bitmask;
use crate::Real;

/// Classified exact part of an areal encoding: the value of the core
/// `sign | exponent | fraction` bits, ignoring the ubit.
#[derive(Clone, Debug)]
pub enum ArealVal {
    /// Signed zero.
    Zero(bool),
    /// Gradual underflow: `(-1)^s * c * 2^expmin`, no hidden one.
    Subnormal(bool, Integer),
    /// `(-1)^s * c * 2^exp` with the hidden one included.
    Normal(bool, isize, Integer),
    /// Signed infinity: exponent all ones, fraction zero, ubit clear.
    Infinity(bool),
    /// Not-a-number: any other pattern of the all-ones band.
    /// Signalling NaNs carry a set sign bit, quiet NaNs a clear one.
    Nan(bool),
}

/// An areal value: the exact part plus the uncertainty bit and the
/// context it was created under.
///
/// With `ubit` set, the encoding denotes the open interval from the
/// exact part to the next exact value away from zero; its numeric
/// reading (the [`Real`] view) is the interval midpoint.
#[derive(Clone, Debug)]
pub struct Areal {
    pub(crate) num: ArealVal,
    pub(crate) ubit: bool,
    pub(crate) ctx: ArealContext,
}

impl Areal {
    /// The rounding context this value was produced under.
    pub fn ctx(&self) -> &ArealContext {
        &self.ctx
    }

    /// The uncertainty bit: true when this encoding denotes an open
    /// interval rather than an exact value.
    pub fn ubit(&self) -> bool {
        self.ubit
    }

    /// Returns true if this encoding is an exact value.
    pub fn is_exact(&self) -> bool {
        !self.ubit
    }

    /// Returns true for gradual-underflow values.
    pub fn is_subnormal(&self) -> bool {
        matches!(self.num, ArealVal::Subnormal(_, _))
    }

    /// Returns true for normal values.
    pub fn is_normal(&self) -> bool {
        matches!(self.num, ArealVal::Normal(_, _, _))
    }

    /// Returns true if this value is NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self.num, ArealVal::Nan(_))
    }

    /// Packs this value into its raw bit pattern.
    pub fn into_bits(&self) -> Integer {
        let nbits = self.ctx.nbits();
        let m = self.ctx.max_m();
        let (s, core) = match &self.num {
            ArealVal::Zero(s) => (*s, Integer::zero()),
            ArealVal::Subnormal(s, c) => (*s, c.clone()),
            ArealVal::Normal(s, exp, c) => {
                let efield = Integer::from((exp + m as isize) + self.ctx.bias()) << m as u32;
                let mfield = c.clone().bitand(bitmask(m));
                (*s, mfield.bitor(efield))
            }
            ArealVal::Infinity(s) => {
                let efield = bitmask(self.ctx.es()) << m as u32;
                (*s, efield)
            }
            ArealVal::Nan(s) => {
                let efield = bitmask(self.ctx.es()) << m as u32;
                let frac = Integer::from(1) << (m - 1) as u32;
                (*s, frac.bitor(efield))
            }
        };
        let mut bits = core << 1u32;
        if self.ubit {
            bits |= 1;
        }
        if s {
            bits |= Integer::from(1) << (nbits - 1) as u32;
        }
        bits
    }

    /// Renders the pattern as `sign . exponent . fraction . ubit`.
    pub fn to_binary(&self) -> String {
        let bits = self.into_bits();
        let nbits = self.ctx.nbits();
        let m = self.ctx.max_m();
        let mut s = String::with_capacity(nbits + 5);
        s.push_str("0b");
        for i in (0..nbits).rev() {
            s.push(if bits.get_bit(i as u32) { '1' } else { '0' });
            if i == nbits - 1 || i == m + 1 || i == 1 {
                s.push('.');
            }
        }
        s
    }

    /// Converts to the nearest `f64`: the exact value, or the
    /// interval midpoint when the ubit is set.
    pub fn to_f64(&self) -> f64 {
        BlockTriple::from_number(self).to_f64()
    }

    // midpoint components (sign, exp, c) of the numeric reading
    fn reading(&self) -> Option<(bool, isize, Integer)> {
        let m = self.ctx.max_m();
        let max_p = self.ctx.max_p();
        match (&self.num, self.ubit) {
            (ArealVal::Zero(s), false) => Some((*s, 0, Integer::zero())),
            // the open interval (0, minpos): midpoint minpos/2
            (ArealVal::Zero(s), true) => Some((*s, self.ctx.expmin() - 1, Integer::from(1))),
            (ArealVal::Subnormal(s, c), false) => Some((*s, self.ctx.expmin(), c.clone())),
            (ArealVal::Subnormal(s, c), true) => {
                if self.ctx.emax() < self.ctx.emin() && *c == bitmask(m) {
                    // es = 1: the top subnormal is maxpos, so this is
                    // the open tail (maxpos, inf); read it as 2*maxpos
                    Some((*s, self.ctx.expmin() + 1, c.clone()))
                } else {
                    let mid = Integer::from(c << 1u32) + 1;
                    Some((*s, self.ctx.expmin() - 1, mid))
                }
            }
            (ArealVal::Normal(s, exp, c), false) => Some((*s, *exp, c.clone())),
            (ArealVal::Normal(s, exp, c), true) => {
                let top = (exp - 1) + c.significant_bits() as isize;
                if top == self.ctx.emax() && *c == bitmask(max_p) {
                    // (maxpos, inf) has no midpoint; read it as 2*maxpos
                    Some((*s, exp + 1, c.clone()))
                } else {
                    let mid = Integer::from(c << 1u32) + 1;
                    Some((*s, exp - 1, mid))
                }
            }
            (ArealVal::Infinity(_), _) | (ArealVal::Nan(_), _) => None,
        }
    }
}

impl Real for Areal {
    fn radix() -> usize {
        2
    }

    fn sign(&self) -> bool {
        match &self.num {
            ArealVal::Zero(s) => *s,
            ArealVal::Subnormal(s, _) => *s,
            ArealVal::Normal(s, _, _) => *s,
            ArealVal::Infinity(s) => *s,
            ArealVal::Nan(s) => *s,
        }
    }

    fn exp(&self) -> Option<isize> {
        match self.reading() {
            Some((_, exp, c)) if !c.is_zero() => Some(exp),
            _ => None,
        }
    }

    fn e(&self) -> Option<isize> {
        match self.reading() {
            Some((_, exp, c)) if !c.is_zero() => {
                Some((exp - 1) + c.significant_bits() as isize)
            }
            _ => None,
        }
    }

    fn n(&self) -> Option<isize> {
        self.exp().map(|exp| exp - 1)
    }

    fn c(&self) -> Option<Integer> {
        self.reading().map(|(_, _, c)| c)
    }

    fn prec(&self) -> Option<usize> {
        self.reading().map(|(_, _, c)| c.significant_bits() as usize)
    }

    fn is_nar(&self) -> bool {
        matches!(&self.num, ArealVal::Infinity(_) | ArealVal::Nan(_))
    }

    fn is_finite(&self) -> bool {
        !self.is_nar()
    }

    fn is_infinite(&self) -> bool {
        matches!(&self.num, ArealVal::Infinity(_))
    }

    fn is_zero(&self) -> bool {
        matches!(&self.num, ArealVal::Zero(_)) && !self.ubit
    }

    fn is_negative(&self) -> Option<bool> {
        match &self.num {
            ArealVal::Zero(s) => {
                if self.ubit {
                    Some(*s)
                } else {
                    None
                }
            }
            ArealVal::Subnormal(s, _) => Some(*s),
            ArealVal::Normal(s, _, _) => Some(*s),
            ArealVal::Infinity(s) => Some(*s),
            ArealVal::Nan(_) => None,
        }
    }

    fn is_numerical(&self) -> bool {
        !matches!(&self.num, ArealVal::Nan(_))
    }
}

impl PartialOrd for Areal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        BlockTriple::from_number(self).partial_cmp(&BlockTriple::from_number(other))
    }
}

impl PartialEq for Areal {
    fn eq(&self, other: &Self) -> bool {
        self.ubit == other.ubit && self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Areal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, self.to_f64()),
            None => write!(f, "{}", self.to_f64()),
        }
    }
}
