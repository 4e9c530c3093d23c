use std::cmp::max;

use rug::Integer;
use tracing::trace;

use crate::areal::{Areal, ArealVal};
use crate::blocktriple::Split;
use crate::error::Error;
use crate::util::bitmask;
use crate::{Real, RoundingContext};

/// Assignment contexts for areal numbers.
///
/// A context fixes `es` (exponent field width) and `nbits` (total
/// width, trailing ubit included). The fraction field spans
/// `nbits - es - 2` bits. Unlike the nearest-rounding contexts, the
/// areal assignment truncates toward zero on the format grid and
/// records any inexactness in the ubit, so the result always contains
/// the assigned number: an exact hit yields the encoding `[v]`, and
/// anything strictly inside a grid interval yields `(v, v_next)`.
#[derive(Clone, Debug)]
pub struct ArealContext {
    es: usize,
    nbits: usize,
}

impl ArealContext {
    /// Constructs a context, panicking on invalid parameters.
    pub fn new(es: usize, nbits: usize) -> Self {
        Self::try_new(es, nbits).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Constructs a context: `es` at least 1 and `nbits` large enough
    /// for sign, exponent, one fraction bit, and the ubit.
    pub fn try_new(es: usize, nbits: usize) -> Result<Self, Error> {
        if es < 1 {
            return Err(Error::ConfigurationInvalid("es must be at least 1"));
        }
        if nbits < es + 3 {
            return Err(Error::ConfigurationInvalid(
                "total width must be at least es + 3",
            ));
        }
        Ok(Self { es, nbits })
    }

    /// Exponent field width.
    pub fn es(&self) -> usize {
        self.es
    }

    /// Total encoding width, ubit included.
    pub fn nbits(&self) -> usize {
        self.nbits
    }

    /// Fraction field width.
    pub fn max_m(&self) -> usize {
        self.nbits - self.es - 2
    }

    /// Maximum significand precision, hidden bit included.
    pub fn max_p(&self) -> usize {
        self.max_m() + 1
    }

    /// The exponent bias.
    pub fn bias(&self) -> isize {
        (1 << (self.es - 1)) - 1
    }

    /// Scale of the largest finite binade (the all-ones exponent band
    /// is reserved).
    pub fn emax(&self) -> isize {
        ((1 << self.es) - 2) - self.bias()
    }

    /// Scale of the smallest normal binade.
    pub fn emin(&self) -> isize {
        1 - self.bias()
    }

    /// Least-digit weight of the format.
    pub fn expmin(&self) -> isize {
        self.emin() - self.max_m() as isize
    }

    fn make(&self, num: ArealVal, ubit: bool) -> Areal {
        Areal {
            num,
            ubit,
            ctx: self.clone(),
        }
    }

    /// Signed zero.
    pub fn zero(&self, sign: bool) -> Areal {
        self.make(ArealVal::Zero(sign), false)
    }

    /// Signed infinity.
    pub fn inf(&self, sign: bool) -> Areal {
        self.make(ArealVal::Infinity(sign), false)
    }

    /// The canonical quiet NaN.
    pub fn qnan(&self) -> Areal {
        self.make(ArealVal::Nan(false), false)
    }

    /// The canonical signalling NaN.
    pub fn snan(&self) -> Areal {
        self.make(ArealVal::Nan(true), false)
    }

    /// Largest exact positive value.
    pub fn maxpos(&self) -> Areal {
        if self.emax() < self.emin() {
            // es = 1 leaves no normal binade; the top subnormal is
            // the largest exact value
            let c = bitmask(self.max_m());
            return self.make(ArealVal::Subnormal(false, c), false);
        }
        let c = bitmask(self.max_p());
        let exp = self.emax() - self.max_m() as isize;
        self.make(ArealVal::Normal(false, exp, c), false)
    }

    /// Smallest exact positive value.
    pub fn minpos(&self) -> Areal {
        self.make(ArealVal::Subnormal(false, Integer::from(1)), false)
    }

    /// Largest-magnitude exact negative value.
    pub fn maxneg(&self) -> Areal {
        let mut v = self.maxpos();
        v.num = match v.num {
            ArealVal::Normal(_, exp, c) => ArealVal::Normal(true, exp, c),
            ArealVal::Subnormal(_, c) => ArealVal::Subnormal(true, c),
            num => num,
        };
        v
    }

    /// Smallest-magnitude exact negative value.
    pub fn minneg(&self) -> Areal {
        self.make(ArealVal::Subnormal(true, Integer::from(1)), false)
    }

    /// Decodes a raw pattern, panicking when it does not fit the
    /// width.
    pub fn bits_to_number(&self, bits: &Integer) -> Areal {
        self.try_bits_to_number(bits)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Decodes a raw pattern into its classified value plus ubit.
    pub fn try_bits_to_number(&self, bits: &Integer) -> Result<Areal, Error> {
        if bits.is_negative() || bits.significant_bits() as usize > self.nbits {
            return Err(Error::UnexpectedEncoding);
        }
        let m = self.max_m();
        let ubit = bits.get_bit(0);
        let s = bits.get_bit((self.nbits - 1) as u32);
        let core = Integer::from(bits >> 1u32) & bitmask(self.nbits - 2);
        let efield = Integer::from(&core >> m as u32) & bitmask(self.es);
        let frac = core & bitmask(m);

        let num = if efield.is_zero() {
            if frac.is_zero() {
                ArealVal::Zero(s)
            } else {
                ArealVal::Subnormal(s, frac)
            }
        } else if efield == bitmask(self.es) {
            if frac.is_zero() && !ubit {
                ArealVal::Infinity(s)
            } else {
                // every other pattern of the reserved band
                return Ok(self.make(ArealVal::Nan(s), ubit));
            }
        } else {
            let c = frac | (Integer::from(1) << m as u32);
            let e = efield.to_i64_wrapping() as isize - self.bias();
            ArealVal::Normal(s, e - m as isize, c)
        };
        Ok(self.make(num, ubit))
    }

    /// Assigns a finite non-zero value: truncate toward zero on the
    /// grid, mark inexactness in the ubit.
    fn round_finite<T: Real>(&self, num: &T) -> Areal {
        let s = num.is_negative().unwrap();
        let e = num.e().unwrap();

        if e > self.emax() {
            // beyond the largest exact value: the (maxpos, inf) slot
            trace!(e, "saturating into the open tail interval");
            let mut v = if s { self.maxneg() } else { self.maxpos() };
            v.ubit = true;
            return v;
        }

        let max_p = self.max_p();
        let n = max(e - max_p as isize, self.expmin() - 1);
        let split = Split::new(num, Some(max_p), n);
        let trunc = split.num();
        let ubit = !split.lost().is_zero();

        match trunc.e() {
            None => {
                // strictly between zero and minpos
                self.make(ArealVal::Zero(s), true)
            }
            Some(er) if er < self.emin() => {
                self.make(ArealVal::Subnormal(s, trunc.c().unwrap()), ubit)
            }
            Some(_) => {
                let bits = trunc.prec().unwrap();
                let shift = max_p - bits;
                let c = trunc.c().unwrap() << shift as u32;
                let exp = trunc.exp().unwrap() - shift as isize;
                self.make(ArealVal::Normal(s, exp, c), ubit)
            }
        }
    }
}

impl RoundingContext for ArealContext {
    type Format = Areal;

    fn round<T: Real>(&self, num: &T) -> Areal {
        if !num.is_numerical() {
            self.qnan()
        } else if num.is_infinite() {
            self.inf(num.sign())
        } else if num.is_zero() {
            self.make(ArealVal::Zero(num.sign()), false)
        } else {
            self.round_finite(num)
        }
    }
}
