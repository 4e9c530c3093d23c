use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitAnd, BitOr};

use num_traits::Zero;
use rug::Integer;

use crate::blocktriple::BlockTriple;
use crate::cfloat::CfloatContext;
use crate::util::bitmask;
use crate::Real;

/// Exception flags raised while producing a rounded result.
///
/// The IEEE 754 standard defines five exceptions; this type keeps the
/// four that are meaningful without traps (division by zero, invalid
/// operation, overflow, underflow) plus `inexact` and the non-standard
/// `carry` flag (the rounding increment bumped the exponent). Flags
/// are recorded on the value that the operation produced; they never
/// alter control flow unless a `checked_*` operation is asked to
/// surface them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Exceptions {
    pub invalid: bool,
    pub divzero: bool,
    pub overflow: bool,
    pub underflow: bool,
    pub inexact: bool,
    pub carry: bool,
}

impl Exceptions {
    /// A clear set of flags.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Classified value of a cfloat encoding.
///
/// Each raw bit pattern of a configuration maps to exactly one
/// variant. Supernormal values (finite values in the all-ones
/// exponent band) are ordinary [`Normal`][CfloatVal::Normal] values
/// whose scale is `emax + 1`; the packing routine recognizes the band
/// from the scale alone.
#[derive(Clone, Debug)]
pub enum CfloatVal {
    /// Signed zero.
    Zero(bool),
    /// Gradual underflow: `(-1)^s * c * 2^expmin` with `c` at most
    /// `nbits - es - 1` bits and no hidden one.
    Subnormal(bool, Integer),
    /// `(-1)^s * c * 2^exp` with `c` exactly `nbits - es` bits
    /// (hidden one included).
    Normal(bool, isize, Integer),
    /// Signed infinity. Never present when supernormals are enabled.
    Infinity(bool),
    /// Not-a-number: sign, quiet marker, and fraction payload.
    /// Signalling NaNs carry a set sign bit, quiet NaNs a clear one.
    Nan(bool, bool, Integer),
}

/// A cfloat value: classified number plus the exception flags and the
/// context it was created under.
#[derive(Clone, Debug)]
pub struct Cfloat {
    pub(crate) num: CfloatVal,
    pub(crate) flags: Exceptions,
    pub(crate) ctx: CfloatContext,
}

impl Cfloat {
    /// The flags recorded when this value was produced.
    pub fn flags(&self) -> &Exceptions {
        &self.flags
    }

    /// The rounding context this value was produced under.
    pub fn ctx(&self) -> &CfloatContext {
        &self.ctx
    }

    /// Returns true for gradual-underflow values.
    pub fn is_subnormal(&self) -> bool {
        matches!(self.num, CfloatVal::Subnormal(_, _))
    }

    /// Returns true for normal values, supernormals included.
    pub fn is_normal(&self) -> bool {
        matches!(self.num, CfloatVal::Normal(_, _, _))
    }

    /// Returns true for finite values in the all-ones exponent band.
    pub fn is_supernormal(&self) -> bool {
        match &self.num {
            CfloatVal::Normal(_, exp, c) => {
                let e = (exp - 1) + c.significant_bits() as isize;
                e > self.ctx.emax()
            }
            _ => false,
        }
    }

    /// Returns true if this value is NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self.num, CfloatVal::Nan(_, _, _))
    }

    /// The quiet marker of a NaN, if this value is one.
    pub fn nan_quiet(&self) -> Option<bool> {
        match &self.num {
            CfloatVal::Nan(_, q, _) => Some(*q),
            _ => None,
        }
    }

    /// The fraction payload of a NaN, if this value is one.
    pub fn nan_payload(&self) -> Option<Integer> {
        match &self.num {
            CfloatVal::Nan(_, _, payload) => Some(payload.clone()),
            _ => None,
        }
    }

    /// Packs this value into its raw bit pattern.
    pub fn into_bits(&self) -> Integer {
        let nbits = self.ctx.nbits();
        let m = self.ctx.max_m();
        let (s, unsigned) = match &self.num {
            CfloatVal::Zero(s) => (*s, Integer::zero()),
            CfloatVal::Subnormal(s, c) => (*s, c.clone()),
            CfloatVal::Normal(s, exp, c) => {
                let efield = Integer::from((exp + m as isize) + self.ctx.bias()) << m as u32;
                let mfield = c.clone().bitand(bitmask(m));
                (*s, mfield.bitor(efield))
            }
            CfloatVal::Infinity(s) => {
                let efield = bitmask(self.ctx.es()) << m as u32;
                (*s, efield)
            }
            CfloatVal::Nan(s, _, payload) => {
                let efield = bitmask(self.ctx.es()) << m as u32;
                if self.ctx.supernormals() {
                    // the single NaR pattern
                    (true, efield)
                } else {
                    let frac = if payload.is_zero() {
                        Integer::from(1) << (m - 1) as u32
                    } else {
                        payload.clone()
                    };
                    (*s, frac.bitor(efield))
                }
            }
        };

        if s {
            let sfield = Integer::from(1) << (nbits - 1) as u32;
            unsigned.bitor(sfield)
        } else {
            unsigned
        }
    }

    /// Renders the pattern as `sign . exponent . fraction`.
    pub fn to_binary(&self) -> String {
        let bits = self.into_bits();
        let nbits = self.ctx.nbits();
        let m = self.ctx.max_m();
        let mut s = String::with_capacity(nbits + 4);
        s.push_str("0b");
        for i in (0..nbits).rev() {
            s.push(if bits.get_bit(i as u32) { '1' } else { '0' });
            if i == nbits - 1 || i == m {
                s.push('.');
            }
        }
        s
    }

    /// Converts to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        BlockTriple::from_number(self).to_f64()
    }
}

impl Real for Cfloat {
    fn radix() -> usize {
        2
    }

    fn sign(&self) -> bool {
        match &self.num {
            CfloatVal::Zero(s) => *s,
            CfloatVal::Subnormal(s, _) => *s,
            CfloatVal::Normal(s, _, _) => *s,
            CfloatVal::Infinity(s) => *s,
            CfloatVal::Nan(s, _, _) => *s,
        }
    }

    fn exp(&self) -> Option<isize> {
        match &self.num {
            CfloatVal::Subnormal(_, _) => Some(self.ctx.expmin()),
            CfloatVal::Normal(_, exp, _) => Some(*exp),
            _ => None,
        }
    }

    fn e(&self) -> Option<isize> {
        match &self.num {
            CfloatVal::Subnormal(_, c) => {
                Some((self.ctx.expmin() - 1) + c.significant_bits() as isize)
            }
            CfloatVal::Normal(_, exp, c) => Some((*exp - 1) + c.significant_bits() as isize),
            _ => None,
        }
    }

    fn n(&self) -> Option<isize> {
        self.exp().map(|exp| exp - 1)
    }

    fn c(&self) -> Option<Integer> {
        match &self.num {
            CfloatVal::Zero(_) => Some(Integer::zero()),
            CfloatVal::Subnormal(_, c) => Some(c.clone()),
            CfloatVal::Normal(_, _, c) => Some(c.clone()),
            _ => None,
        }
    }

    fn prec(&self) -> Option<usize> {
        match &self.num {
            CfloatVal::Zero(_) => Some(0),
            CfloatVal::Subnormal(_, c) => Some(c.significant_bits() as usize),
            CfloatVal::Normal(_, _, c) => Some(c.significant_bits() as usize),
            _ => None,
        }
    }

    fn is_nar(&self) -> bool {
        matches!(
            &self.num,
            CfloatVal::Infinity(_) | CfloatVal::Nan(_, _, _)
        )
    }

    fn is_finite(&self) -> bool {
        !self.is_nar()
    }

    fn is_infinite(&self) -> bool {
        matches!(&self.num, CfloatVal::Infinity(_))
    }

    fn is_zero(&self) -> bool {
        matches!(&self.num, CfloatVal::Zero(_))
    }

    fn is_negative(&self) -> Option<bool> {
        match &self.num {
            CfloatVal::Zero(_) => None,
            CfloatVal::Subnormal(s, _) => Some(*s),
            CfloatVal::Normal(s, _, _) => Some(*s),
            CfloatVal::Infinity(s) => Some(*s),
            CfloatVal::Nan(_, _, _) => None,
        }
    }

    fn is_numerical(&self) -> bool {
        !matches!(&self.num, CfloatVal::Nan(_, _, _))
    }
}

impl PartialOrd for Cfloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        BlockTriple::from_number(self).partial_cmp(&BlockTriple::from_number(other))
    }
}

impl PartialEq for Cfloat {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Cfloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, self.to_f64()),
            None => write!(f, "{}", self.to_f64()),
        }
    }
}
