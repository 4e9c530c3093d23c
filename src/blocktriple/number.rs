use std::cmp::Ordering;
use std::cmp::{max, min};

use num_traits::Zero;
use rug::{Float, Integer};

use gmp_mpfr_sys::mpfr;

use crate::blockbinary::BlockBinary;
use crate::Real;

/// Sign / scale / significand working value.
///
/// A finite non-zero triple `Normal(s, exp, c)` has the value
/// `(-1)^s * c * 2^exp` where `c` is a non-zero unsigned magnitude in
/// a [`BlockBinary`]; the scale of the value (the weight of the
/// leading 1, [`Real::e`]) is `exp + len(c) - 1`. Zeros keep their
/// sign: decode and encode preserve `-0` bitwise, and an exactly-zero
/// sum takes the sign `sa && sb`, so `-0 + -0 == -0` while
/// `x - x == +0` under round-to-nearest.
#[derive(Debug, Clone)]
pub enum BlockTriple {
    /// A signed zero.
    Zero(bool),
    /// A finite non-zero value `(-1)^s * c * 2^exp`.
    Normal(bool, isize, BlockBinary),
    /// A signed infinity.
    Inf(bool),
    /// Not a real number. Triples carry no NaN payload; formats
    /// materialize their canonical NaN encoding when rounding.
    Nan,
}

impl BlockTriple {
    /// Constructs the canonical `+0`.
    pub fn zero() -> Self {
        BlockTriple::Zero(false)
    }

    /// Constructs the canonical `+1`.
    pub fn one() -> Self {
        BlockTriple::Normal(false, 0, BlockBinary::from_u64(1, 1))
    }

    /// Returns true if the value is not-a-number.
    pub fn is_nan(&self) -> bool {
        matches!(self, BlockTriple::Nan)
    }

    /// The unsigned significand, when finite and non-zero.
    pub fn significand(&self) -> Option<&BlockBinary> {
        match self {
            BlockTriple::Normal(_, _, c) => Some(c),
            _ => None,
        }
    }

    /// The scale: the unbiased binary exponent of the leading 1.
    /// Alias of [`Real::e`].
    pub fn scale(&self) -> Option<isize> {
        self.e()
    }

    /// Constructs a finite triple from an unsigned [`Integer`]
    /// magnitude.
    pub(crate) fn from_parts(sign: bool, exp: isize, c: &Integer) -> Self {
        if c.is_zero() {
            BlockTriple::Zero(sign)
        } else {
            let bits = c.significant_bits() as usize;
            BlockTriple::Normal(sign, exp, BlockBinary::from_integer(bits, c))
        }
    }

    /// Converts any [`Real`] into a triple. This is the default
    /// decode path from an encoded format into the arithmetic core.
    pub fn from_number<N: Real>(val: &N) -> Self {
        if !val.is_numerical() {
            BlockTriple::Nan
        } else if val.is_infinite() {
            BlockTriple::Inf(val.sign())
        } else if val.is_zero() {
            BlockTriple::Zero(val.sign())
        } else {
            Self::from_parts(val.sign(), val.exp().unwrap(), &val.c().unwrap())
        }
    }

    /// Converts to the nearest `f64`, preserving zero signs and
    /// non-real classes.
    pub fn to_f64(&self) -> f64 {
        match self {
            BlockTriple::Zero(s) => {
                if *s {
                    -0.0
                } else {
                    0.0
                }
            }
            BlockTriple::Inf(s) => {
                if *s {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }
            BlockTriple::Nan => f64::NAN,
            BlockTriple::Normal(_, _, _) => Float::from(self.clone()).to_f64(),
        }
    }
}

impl From<f64> for BlockTriple {
    /// Exact conversion: every finite `f64` is `(-1)^s * c * 2^exp`
    /// with `c` at most 53 bits. Decomposes the IEEE 754 pattern
    /// directly so the result is independent of host rounding state.
    fn from(x: f64) -> Self {
        let bits = x.to_bits();
        let s = (bits >> 63) != 0;
        let biased = ((bits >> 52) & 0x7ff) as isize;
        let frac = bits & ((1u64 << 52) - 1);
        if biased == 0x7ff {
            if frac == 0 {
                BlockTriple::Inf(s)
            } else {
                BlockTriple::Nan
            }
        } else if biased == 0 {
            // zero or subnormal
            if frac == 0 {
                BlockTriple::Zero(s)
            } else {
                BlockTriple::Normal(s, -1074, BlockBinary::from_u64(52, frac))
            }
        } else {
            let c = frac | (1u64 << 52);
            BlockTriple::Normal(s, biased - 1075, BlockBinary::from_u64(53, c))
        }
    }
}

impl From<f32> for BlockTriple {
    fn from(x: f32) -> Self {
        BlockTriple::from(x as f64)
    }
}

// Implements the universal numeric view for the working triple.
impl Real for BlockTriple {
    fn radix() -> usize {
        2
    }

    fn sign(&self) -> bool {
        match self {
            BlockTriple::Zero(s) => *s,
            BlockTriple::Normal(s, _, _) => *s,
            BlockTriple::Inf(s) => *s,
            BlockTriple::Nan => false,
        }
    }

    fn exp(&self) -> Option<isize> {
        match self {
            BlockTriple::Normal(_, exp, _) => Some(*exp),
            _ => None,
        }
    }

    fn e(&self) -> Option<isize> {
        match self {
            BlockTriple::Normal(_, exp, c) => {
                Some((exp - 1) + c.significant_bits() as isize)
            }
            _ => None,
        }
    }

    fn n(&self) -> Option<isize> {
        self.exp().map(|exp| exp - 1)
    }

    fn c(&self) -> Option<Integer> {
        match self {
            BlockTriple::Zero(_) => Some(Integer::new()),
            BlockTriple::Normal(_, _, c) => Some(c.to_unsigned()),
            _ => None,
        }
    }

    fn prec(&self) -> Option<usize> {
        match self {
            BlockTriple::Zero(_) => Some(0),
            BlockTriple::Normal(_, _, c) => Some(c.significant_bits()),
            _ => None,
        }
    }

    fn is_nar(&self) -> bool {
        matches!(self, BlockTriple::Inf(_) | BlockTriple::Nan)
    }

    fn is_finite(&self) -> bool {
        matches!(self, BlockTriple::Zero(_) | BlockTriple::Normal(_, _, _))
    }

    fn is_infinite(&self) -> bool {
        matches!(self, BlockTriple::Inf(_))
    }

    fn is_zero(&self) -> bool {
        matches!(self, BlockTriple::Zero(_))
    }

    fn is_negative(&self) -> Option<bool> {
        match self {
            BlockTriple::Zero(_) => None,
            BlockTriple::Normal(s, _, _) => Some(*s),
            BlockTriple::Inf(s) => Some(*s),
            BlockTriple::Nan => None,
        }
    }

    fn is_numerical(&self) -> bool {
        !matches!(self, BlockTriple::Nan)
    }
}

impl PartialOrd for BlockTriple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use BlockTriple::*;
        match (self, other) {
            (Nan, _) | (_, Nan) => None,
            (Inf(true), Inf(true)) => Some(Ordering::Equal),
            (Inf(false), Inf(false)) => Some(Ordering::Equal),
            (Inf(false), _) => Some(Ordering::Greater),
            (Inf(true), _) => Some(Ordering::Less),
            (_, Inf(false)) => Some(Ordering::Less),
            (_, Inf(true)) => Some(Ordering::Greater),
            (Zero(_), Zero(_)) => Some(Ordering::Equal),
            (Zero(_), Normal(s, _, _)) => {
                if *s {
                    Some(Ordering::Greater)
                } else {
                    Some(Ordering::Less)
                }
            }
            (Normal(s, _, _), Zero(_)) => {
                if *s {
                    Some(Ordering::Less)
                } else {
                    Some(Ordering::Greater)
                }
            }
            (Normal(s1, exp1, c1), Normal(s2, exp2, c2)) => {
                if s1 != s2 {
                    return if *s1 {
                        Some(Ordering::Less)
                    } else {
                        Some(Ordering::Greater)
                    };
                }
                // magnitudes: normalized exponent first, then the
                // aligned ordinals on the slow path
                let e1 = (exp1 - 1) + c1.significant_bits() as isize;
                let e2 = (exp2 - 1) + c2.significant_bits() as isize;
                let mag_cmp = match e1.cmp(&e2) {
                    Ordering::Equal => {
                        let n = min(*exp1, *exp2);
                        let ord1 = c1.to_unsigned() << (exp1 - n) as u32;
                        let ord2 = c2.to_unsigned() << (exp2 - n) as u32;
                        ord1.cmp(&ord2)
                    }
                    ord => ord,
                };
                if *s1 {
                    Some(mag_cmp.reverse())
                } else {
                    Some(mag_cmp)
                }
            }
        }
    }
}

impl PartialEq for BlockTriple {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl From<BlockTriple> for Float {
    fn from(val: BlockTriple) -> Self {
        use rug::float::*;
        match val {
            BlockTriple::Nan => Float::with_val(prec_min(), Special::Nan),
            BlockTriple::Inf(false) => Float::with_val(prec_min(), Special::Infinity),
            BlockTriple::Inf(true) => Float::with_val(prec_min(), Special::NegInfinity),
            BlockTriple::Zero(false) => Float::with_val(prec_min(), Special::Zero),
            BlockTriple::Zero(true) => Float::with_val(prec_min(), Special::NegZero),
            BlockTriple::Normal(s, exp, c) => {
                let c = c.to_unsigned();
                let mut f = Float::new(max(1, c.significant_bits()));
                let rnd = mpfr::rnd_t::RNDN;
                let exp = exp as i64;
                let m = if s { -c } else { c };

                unsafe {
                    // set `f` to `m * 2^exp`
                    let t = mpfr::set_z_2exp(f.as_raw_mut(), m.as_raw(), exp, rnd);
                    assert_eq!(t, 0, "should have been exact");
                }

                f
            }
        }
    }
}

impl From<Float> for BlockTriple {
    fn from(val: Float) -> Self {
        if val.is_nan() {
            Self::Nan
        } else if val.is_infinite() {
            Self::Inf(val.is_sign_negative())
        } else if val.is_zero() {
            Self::Zero(val.is_sign_negative())
        } else {
            let mut m = Integer::zero();
            let exp: isize;

            unsafe {
                exp = mpfr::get_z_2exp(m.as_raw_mut(), val.as_raw()) as isize;
            }

            Self::from_parts(m.is_negative(), exp, &m.abs())
        }
    }
}
