use std::cmp::Ordering;
use std::fmt;

use num_traits::One;
use rug::Integer;

use crate::blocktriple::BlockTriple;
use crate::util::bitmask;
use crate::Real;

use super::PositContext;

/// Posit number encoding viewed as an enumeration.
/// Unlike [`Posit`], [`PositVal`] represents only numerical data.
#[derive(Clone, Debug)]
pub enum PositVal {
    /// Exact zero (posits have a single, unsigned zero).
    Zero,
    /// Finite non-zero value `(-1)^s * c * 2^(r * 2^es + exp)`:
    /// sign, regime, exponent adjustment, and significand with the
    /// hidden one included.
    NonZero(bool, isize, isize, Integer),
    /// Not-a-Real, the single projective exception value.
    Nar,
}

/// Posit number format.
///
/// The associated [`RoundingContext`][crate::RoundingContext]
/// implementation is [`PositContext`]; see it for the numerical
/// properties of the format.
#[derive(Clone, Debug)]
pub struct Posit {
    pub(crate) num: PositVal,
    pub(crate) ctx: PositContext,
}

impl Posit {
    /// Returns the rounding context under which this number was created.
    pub fn ctx(&self) -> &PositContext {
        &self.ctx
    }

    /// Returns true if this value is NaR.
    pub fn is_nar(&self) -> bool {
        matches!(self.num, PositVal::Nar)
    }

    /// Converts to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        BlockTriple::from_number(self).to_f64()
    }

    // positive body (the nbits-1 bits below the sign) of the magnitude
    fn magnitude_body(&self) -> Option<Integer> {
        let es = self.ctx.es();
        let nbits = self.ctx.nbits();
        match &self.num {
            PositVal::Zero | PositVal::Nar => None,
            PositVal::NonZero(_, r, exp, c) => {
                // regime run length and polarity
                let (kbits, r0) = if *r < 0 {
                    (-r as usize, false)
                } else {
                    (*r as usize + 1, true)
                };

                // regime alone fills the body
                if kbits >= nbits - 1 {
                    return Some(if r0 {
                        bitmask(nbits - 1)
                    } else {
                        Integer::one()
                    });
                }

                // field widths after the regime and its terminator
                let rbits = kbits + 1;
                let embits = nbits - 1 - rbits;
                let (ebits, mbits) = if embits <= es {
                    (embits, 0)
                } else {
                    (es, embits - es)
                };

                // regime: ones then zero, or zeros then one
                let rfield = if r0 {
                    bitmask(kbits) << 1u32
                } else {
                    Integer::one()
                };

                // exponent, dropping bits the encoding cannot hold
                let p = c.significant_bits() as usize;
                let e = exp + (p as isize - 1);
                let efield = Integer::from(e >> (es - ebits) as u32);

                // significand without the hidden one
                let mfield = bitmask(p - 1) & c.clone();

                Some((rfield << embits as u32) | (efield << mbits as u32) | mfield)
            }
        }
    }

    /// Converts this [`Posit`] to an [`Integer`] posit bit pattern.
    /// Negative values are the two's complement of the positive body.
    pub fn into_bits(self) -> Integer {
        let nbits = self.ctx.nbits();
        match &self.num {
            PositVal::Zero => Integer::new(),
            PositVal::Nar => Integer::one() << (nbits - 1) as u32,
            PositVal::NonZero(s, _, _, _) => {
                let body = self.magnitude_body().unwrap();
                if *s {
                    (Integer::one() << nbits as u32) - body
                } else {
                    body
                }
            }
        }
    }

    /// Renders the pattern as `sign . regime . exponent . fraction`,
    /// with the field boundaries of the magnitude body.
    pub fn to_binary(&self) -> String {
        let nbits = self.ctx.nbits();
        let es = self.ctx.es();
        let bits = self.clone().into_bits();
        let mut s = String::with_capacity(nbits + 4);
        s.push_str("0b");
        s.push(if bits.get_bit((nbits - 1) as u32) { '1' } else { '0' });
        match &self.num {
            PositVal::Zero | PositVal::Nar => {
                s.push('.');
                for i in (0..nbits - 1).rev() {
                    s.push(if bits.get_bit(i as u32) { '1' } else { '0' });
                }
            }
            PositVal::NonZero(_, r, _, _) => {
                let body = self.magnitude_body().unwrap();
                let (kbits, _) = if *r < 0 {
                    (-r as usize, false)
                } else {
                    (*r as usize + 1, true)
                };
                let rbits = (kbits + 1).min(nbits - 1);
                let ebits = es.min(nbits - 1 - rbits);
                s.push('.');
                for i in (0..nbits - 1).rev() {
                    s.push(if body.get_bit(i as u32) { '1' } else { '0' });
                    let pos = nbits - 1 - i;
                    if (pos == rbits || pos == rbits + ebits) && i != 0 {
                        s.push('.');
                    }
                }
            }
        }
        s
    }
}

impl Real for Posit {
    fn radix() -> usize {
        2
    }

    fn sign(&self) -> bool {
        self.is_negative().unwrap_or(false)
    }

    fn exp(&self) -> Option<isize> {
        match &self.num {
            PositVal::NonZero(_, r, exp, _) => Some((r * self.ctx.rscale()) + exp),
            _ => None,
        }
    }

    fn e(&self) -> Option<isize> {
        match &self.num {
            PositVal::NonZero(_, r, exp, c) => {
                Some((r * self.ctx.rscale()) + exp + (c.significant_bits() as isize - 1))
            }
            _ => None,
        }
    }

    fn n(&self) -> Option<isize> {
        self.exp().map(|exp| exp - 1)
    }

    fn c(&self) -> Option<Integer> {
        match &self.num {
            PositVal::Zero => Some(Integer::new()),
            PositVal::NonZero(_, _, _, c) => Some(c.clone()),
            PositVal::Nar => None,
        }
    }

    fn prec(&self) -> Option<usize> {
        match &self.num {
            PositVal::Zero => Some(0),
            PositVal::NonZero(_, _, _, c) => Some(c.significant_bits() as usize),
            PositVal::Nar => None,
        }
    }

    fn is_nar(&self) -> bool {
        matches!(self.num, PositVal::Nar)
    }

    fn is_finite(&self) -> bool {
        !matches!(self.num, PositVal::Nar)
    }

    fn is_infinite(&self) -> bool {
        false
    }

    fn is_zero(&self) -> bool {
        matches!(self.num, PositVal::Zero)
    }

    fn is_negative(&self) -> Option<bool> {
        match &self.num {
            PositVal::NonZero(s, _, _, _) => Some(*s),
            _ => None,
        }
    }

    fn is_numerical(&self) -> bool {
        !matches!(self.num, PositVal::Nar)
    }
}

impl PartialOrd for Posit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        BlockTriple::from_number(self).partial_cmp(&BlockTriple::from_number(other))
    }
}

impl PartialEq for Posit {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl From<Posit> for BlockTriple {
    fn from(value: Posit) -> Self {
        BlockTriple::from_number(&value)
    }
}

impl fmt::Display for Posit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, self.to_f64()),
            None => write!(f, "{}", self.to_f64()),
        }
    }
}
