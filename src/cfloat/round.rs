use std::cmp::max;

use rug::Integer;
use tracing::trace;

use crate::blocktriple::{round_finalize, Split};
use crate::cfloat::{Cfloat, CfloatVal, Exceptions};
use crate::error::Error;
use crate::util::bitmask;
use crate::{Real, RoundingContext, RoundingMode};

/// Rounding contexts for cfloat numbers.
///
/// A context fixes the format parameters `es` (exponent field width)
/// and `nbits` (total width), the three edge-behavior flags, and the
/// rounding mode. Defaults are IEEE-754-like: subnormals on,
/// supernormals off, non-saturating, round-to-nearest ties-to-even.
#[derive(Clone, Debug)]
pub struct CfloatContext {
    es: usize,
    nbits: usize,
    subnormals: bool,
    supernormals: bool,
    saturating: bool,
    rm: RoundingMode,
}

impl CfloatContext {
    /// Constructs a context, panicking on invalid parameters.
    /// Use [`try_new`][CfloatContext::try_new] for a fallible variant.
    pub fn new(es: usize, nbits: usize) -> Self {
        Self::try_new(es, nbits).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Constructs a context: `nbits` must be at least 3 and `es` must
    /// leave room for the sign and at least one fraction bit.
    pub fn try_new(es: usize, nbits: usize) -> Result<Self, Error> {
        if nbits < 3 {
            return Err(Error::ConfigurationInvalid("nbits must be at least 3"));
        }
        if es < 1 || es > nbits - 2 {
            return Err(Error::ConfigurationInvalid(
                "es must satisfy 1 <= es <= nbits - 2",
            ));
        }
        Ok(Self {
            es,
            nbits,
            subnormals: true,
            supernormals: false,
            saturating: false,
            rm: RoundingMode::NearestTiesToEven,
        })
    }

    /// IEEE 754 single precision, binary32.
    pub fn single() -> Self {
        Self::new(8, 32)
    }

    /// IEEE 754 double precision, binary64.
    pub fn double() -> Self {
        Self::new(11, 64)
    }

    /// Brain floating point, bfloat16.
    pub fn bfloat16() -> Self {
        Self::new(8, 16)
    }

    /// TensorFloat-32: 19 bits with a single-precision exponent and a
    /// half-precision fraction.
    pub fn tf32() -> Self {
        Self::new(8, 19)
    }

    /// The 8-bit e4m3 format.
    pub fn fp8e4m3() -> Self {
        Self::new(4, 8)
    }

    /// Sets the rounding mode.
    pub fn with_rounding_mode(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    /// Enables or disables the gradual-underflow band.
    pub fn with_subnormals(mut self, enable: bool) -> Self {
        self.subnormals = enable;
        self
    }

    /// Reinterprets the all-ones exponent band as finite values.
    pub fn with_supernormals(mut self, enable: bool) -> Self {
        self.supernormals = enable;
        self
    }

    /// Clamps overflow to the largest finite values instead of
    /// producing infinities.
    pub fn with_saturating(mut self, enable: bool) -> Self {
        self.saturating = enable;
        self
    }

    /// Exponent field width.
    pub fn es(&self) -> usize {
        self.es
    }

    /// Total encoding width.
    pub fn nbits(&self) -> usize {
        self.nbits
    }

    /// Whether the all-zero exponent band holds subnormals.
    pub fn subnormals(&self) -> bool {
        self.subnormals
    }

    /// Whether the all-ones exponent band holds finite values.
    pub fn supernormals(&self) -> bool {
        self.supernormals
    }

    /// Whether overflow saturates.
    pub fn saturating(&self) -> bool {
        self.saturating
    }

    /// The rounding mode.
    pub fn rm(&self) -> RoundingMode {
        self.rm
    }

    /// Maximum significand precision, hidden bit included.
    pub fn max_p(&self) -> usize {
        self.nbits - self.es
    }

    /// Fraction field width.
    pub fn max_m(&self) -> usize {
        self.nbits - self.es - 1
    }

    /// Scale of the largest ordinary normal binade.
    pub fn emax(&self) -> isize {
        (1 << (self.es - 1)) - 1
    }

    /// Scale of the smallest normal binade.
    pub fn emin(&self) -> isize {
        1 - self.emax()
    }

    /// Scale of the largest finite binade; one above
    /// [`emax`][CfloatContext::emax] when supernormals are enabled.
    pub fn emax_eff(&self) -> isize {
        if self.supernormals {
            self.emax() + 1
        } else {
            self.emax()
        }
    }

    /// The exponent bias.
    pub fn bias(&self) -> isize {
        self.emax()
    }

    /// Least-digit weight of normal values at `emax`.
    pub fn expmax(&self) -> isize {
        self.emax() - self.max_m() as isize
    }

    /// Least-digit weight of the format: the weight of the last
    /// subnormal digit.
    pub fn expmin(&self) -> isize {
        self.emin() - self.max_m() as isize
    }

    fn make(&self, num: CfloatVal, flags: Exceptions) -> Cfloat {
        Cfloat {
            num,
            flags,
            ctx: self.clone(),
        }
    }

    /// Signed zero.
    pub fn zero(&self, sign: bool) -> Cfloat {
        self.make(CfloatVal::Zero(sign), Exceptions::new())
    }

    /// Signed infinity. Only meaningful without supernormals.
    pub fn inf(&self, sign: bool) -> Cfloat {
        assert!(
            !self.supernormals,
            "supernormal configurations have no infinities"
        );
        self.make(CfloatVal::Infinity(sign), Exceptions::new())
    }

    /// The canonical quiet NaN.
    pub fn qnan(&self) -> Cfloat {
        if self.supernormals {
            self.make(CfloatVal::Nan(true, true, Integer::new()), Exceptions::new())
        } else {
            let payload = Integer::from(1) << (self.max_m() - 1) as u32;
            self.make(CfloatVal::Nan(false, true, payload), Exceptions::new())
        }
    }

    /// The canonical signalling NaN (the NaR pattern when supernormals
    /// are enabled).
    pub fn snan(&self) -> Cfloat {
        if self.supernormals {
            self.make(CfloatVal::Nan(true, true, Integer::new()), Exceptions::new())
        } else {
            let payload = Integer::from(1) << (self.max_m() - 1) as u32;
            self.make(CfloatVal::Nan(true, false, payload), Exceptions::new())
        }
    }

    /// Largest finite positive value.
    pub fn maxpos(&self) -> Cfloat {
        if self.emax_eff() < self.emin() {
            // no normal binade exists (es = 1 without supernormals):
            // the largest finite value is the top subnormal
            let c = bitmask(self.max_m());
            return self.make(CfloatVal::Subnormal(false, c), Exceptions::new());
        }
        let c = bitmask(self.max_p());
        let exp = self.emax_eff() - self.max_m() as isize;
        self.make(CfloatVal::Normal(false, exp, c), Exceptions::new())
    }

    /// Smallest positive value.
    pub fn minpos(&self) -> Cfloat {
        if self.subnormals {
            self.make(CfloatVal::Subnormal(false, Integer::from(1)), Exceptions::new())
        } else {
            let c = Integer::from(1) << self.max_m() as u32;
            let exp = self.emin() - self.max_m() as isize;
            self.make(CfloatVal::Normal(false, exp, c), Exceptions::new())
        }
    }

    /// Largest-magnitude negative value. With supernormals enabled
    /// this is the most negative finite encoding, one step short of
    /// the NaR pattern.
    pub fn maxneg(&self) -> Cfloat {
        let mut v = self.maxpos();
        v.num = match v.num {
            CfloatVal::Normal(_, exp, c) => CfloatVal::Normal(true, exp, c),
            CfloatVal::Subnormal(_, c) => CfloatVal::Subnormal(true, c),
            num => num,
        };
        v
    }

    /// Smallest-magnitude negative value.
    pub fn minneg(&self) -> Cfloat {
        let mut v = self.minpos();
        v.num = match v.num {
            CfloatVal::Subnormal(_, c) => CfloatVal::Subnormal(true, c),
            CfloatVal::Normal(_, exp, c) => CfloatVal::Normal(true, exp, c),
            num => num,
        };
        v
    }

    /// Decodes a raw pattern, panicking when it does not fit the
    /// width. Use [`try_bits_to_number`][CfloatContext::try_bits_to_number]
    /// for a fallible variant.
    pub fn bits_to_number(&self, bits: &Integer) -> Cfloat {
        self.try_bits_to_number(bits)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Decodes a raw pattern into its classified value.
    pub fn try_bits_to_number(&self, bits: &Integer) -> Result<Cfloat, Error> {
        if bits.is_negative() || bits.significant_bits() as usize > self.nbits {
            return Err(Error::UnexpectedEncoding);
        }
        let m = self.max_m();
        let s = bits.get_bit((self.nbits - 1) as u32);
        let efield = Integer::from(bits >> m as u32) & bitmask(self.es);
        let frac = Integer::from(bits & bitmask(m));

        let num = if efield.is_zero() {
            if frac.is_zero() {
                CfloatVal::Zero(s)
            } else if self.subnormals {
                CfloatVal::Subnormal(s, frac)
            } else if self.saturating {
                // the band is dead: nonzero patterns snap to minpos
                return Ok(self.minpos_signed(s));
            } else {
                CfloatVal::Zero(s)
            }
        } else if efield == bitmask(self.es) {
            if self.supernormals {
                if s && frac.is_zero() {
                    CfloatVal::Nan(true, true, Integer::new())
                } else {
                    let c = frac | (Integer::from(1) << m as u32);
                    let exp = (self.emax() + 1) - m as isize;
                    CfloatVal::Normal(s, exp, c)
                }
            } else if frac.is_zero() {
                CfloatVal::Infinity(s)
            } else {
                // quiet iff the sign bit is clear
                CfloatVal::Nan(s, !s, frac)
            }
        } else {
            let c = frac | (Integer::from(1) << m as u32);
            let e = efield.to_i64_wrapping() as isize - self.bias();
            CfloatVal::Normal(s, e - m as isize, c)
        };
        Ok(self.make(num, Exceptions::new()))
    }

    fn minpos_signed(&self, sign: bool) -> Cfloat {
        if sign {
            self.minneg()
        } else {
            self.minpos()
        }
    }

    fn maxpos_signed(&self, sign: bool) -> Cfloat {
        if sign {
            self.maxneg()
        } else {
            self.maxpos()
        }
    }

    /// Rounds a finite non-zero value into the format.
    fn round_finite<T: Real>(&self, num: &T) -> Cfloat {
        let max_p = self.max_p();
        let e = num.e().unwrap();
        let unbounded_n = e - max_p as isize;
        let n = if self.subnormals {
            max(unbounded_n, self.expmin() - 1)
        } else {
            unbounded_n
        };

        let split = Split::new(num, Some(max_p), n);
        let inexact = !split.lost().is_zero();
        let trunc_e = split.num().e();
        let rounded = round_finalize(&split, self.rm);

        match rounded.e() {
            None => {
                // rounded away to nothing
                trace!(e, "underflow to zero");
                let flags = Exceptions {
                    underflow: true,
                    inexact,
                    ..Default::default()
                };
                if !self.subnormals && self.saturating {
                    let mut v = self.minpos_signed(num.sign());
                    v.flags = flags;
                    v
                } else {
                    self.make(CfloatVal::Zero(num.sign()), flags)
                }
            }
            Some(er) if er > self.emax_eff() => {
                trace!(er, "overflow");
                let flags = Exceptions {
                    overflow: true,
                    inexact: true,
                    ..Default::default()
                };
                if self.saturating || self.supernormals {
                    let mut v = self.maxpos_signed(rounded.sign());
                    v.flags = flags;
                    v
                } else {
                    self.make(CfloatVal::Infinity(rounded.sign()), flags)
                }
            }
            Some(er) if er < self.emin() => {
                let flags = Exceptions {
                    underflow: inexact,
                    inexact,
                    ..Default::default()
                };
                if self.subnormals {
                    // the split floored n at expmin - 1, so the digits
                    // already sit at the subnormal scale
                    self.make(
                        CfloatVal::Subnormal(rounded.sign(), rounded.c().unwrap()),
                        flags,
                    )
                } else if self.saturating {
                    let mut v = self.minpos_signed(rounded.sign());
                    v.flags = Exceptions {
                        underflow: true,
                        inexact: true,
                        ..Default::default()
                    };
                    v
                } else {
                    let mut v = self.zero(rounded.sign());
                    v.flags = Exceptions {
                        underflow: true,
                        inexact: true,
                        ..Default::default()
                    };
                    v
                }
            }
            Some(er) => {
                // normal (or supernormal) result: normalize the
                // significand to the full width
                let s = rounded.sign();
                let bits = rounded.prec().unwrap();
                let shift = max_p - bits;
                let c = rounded.c().unwrap() << shift as u32;
                let exp = rounded.exp().unwrap() - shift as isize;
                let carry = trunc_e.map_or(false, |te| er > te);
                let flags = Exceptions {
                    inexact,
                    carry,
                    ..Default::default()
                };
                if self.supernormals && s && er == self.emax() + 1 && c == (Integer::from(1) << (max_p - 1) as u32)
                {
                    // this magnitude is the NaR pattern; step down one
                    // encoding to the nearest representable neighbor
                    let body = (bitmask(self.es) << self.max_m() as u32) - 1;
                    let bits = body | (Integer::from(1) << (self.nbits - 1) as u32);
                    let mut v = self.bits_to_number(&bits);
                    v.flags = Exceptions {
                        inexact: true,
                        ..flags
                    };
                    v
                } else {
                    self.make(CfloatVal::Normal(s, exp, c), flags)
                }
            }
        }
    }
}

impl RoundingContext for CfloatContext {
    type Format = Cfloat;

    fn round<T: Real>(&self, num: &T) -> Cfloat {
        if !num.is_numerical() {
            self.qnan()
        } else if num.is_infinite() {
            if self.saturating || self.supernormals {
                self.maxpos_signed(num.sign())
            } else {
                self.make(CfloatVal::Infinity(num.sign()), Exceptions::new())
            }
        } else if num.is_zero() {
            self.make(CfloatVal::Zero(num.sign()), Exceptions::new())
        } else {
            self.round_finite(num)
        }
    }
}
