use rug::Integer;
use tracing::trace;

use crate::error::Error;
use crate::util::bitmask;
use crate::{Real, RoundingContext};

use super::{Posit, PositVal};

/// Rounding contexts for posit numbers.
///
/// Values rounded under this context are base-2 scientific numbers
/// `(-1)^s * c * 2^e * (2^2^es)^r` where `c` is an unsigned integer
/// and `r` and `e` are integers. The precision of `c` and `e` varies
/// with the regime `r`: wide near `r = 0`, down to a single digit at
/// the ends of the range. In posit terminology `2^2^es` is `useed`.
///
/// A [`PositContext`] is parameterized by the exponent field width
/// `es` and the total width `nbits`. Rounding is to nearest, ties to
/// even, on the discarded encoding tail, with two guards: finite
/// values never round to NaR (overflow saturates at `maxpos`) and
/// nonzero values never round to zero (underflow stops at `minpos`).
#[derive(Clone, Debug)]
pub struct PositContext {
    es: usize,
    nbits: usize,
}

impl PositContext {
    /// Implementation limit: maximum exponent size.
    pub const ES_MAX: usize = 32;
    /// Implementation limit: minimum additional bitwidth.
    pub const PAD_MIN: usize = 3;

    /// Constructs a context, panicking on invalid parameters.
    pub fn new(es: usize, nbits: usize) -> Self {
        Self::try_new(es, nbits).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Constructs a context: `es` at most
    /// [`ES_MAX`][PositContext::ES_MAX] and `nbits` at least
    /// `es + 3` so that sign, regime, and exponent fit.
    pub fn try_new(es: usize, nbits: usize) -> Result<Self, Error> {
        if es > Self::ES_MAX {
            return Err(Error::ConfigurationInvalid(
                "exponent width exceeds ES_MAX",
            ));
        }
        if nbits < es + Self::PAD_MIN {
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

    /// Total encoding width.
    pub fn nbits(&self) -> usize {
        self.nbits
    }

    /// Maximum significand precision: regime of two bits, exponent,
    /// hidden one, and the remaining fraction.
    pub fn max_p(&self) -> usize {
        self.nbits - self.es - 2
    }

    /// Posit terminology for `2^2^es`.
    pub fn useed(&self) -> Integer {
        Integer::from(1) << (1u32 << self.es)
    }

    /// The regime scale `2^es`.
    pub fn rscale(&self) -> isize {
        1 << self.es
    }

    /// Largest representable regime.
    pub fn rmax(&self) -> isize {
        self.nbits as isize - 2
    }

    /// Smallest representable regime.
    pub fn rmin(&self) -> isize {
        2 - self.nbits as isize
    }

    /// Scale of `maxpos`.
    pub fn emax(&self) -> isize {
        self.rscale() * self.rmax()
    }

    /// Scale of `minpos`.
    pub fn emin(&self) -> isize {
        self.rscale() * self.rmin()
    }

    fn make(&self, num: PositVal) -> Posit {
        Posit {
            num,
            ctx: self.clone(),
        }
    }

    /// The single (unsigned) zero.
    pub fn zero(&self) -> Posit {
        self.make(PositVal::Zero)
    }

    /// Not-a-Real, the single exception value.
    pub fn nar(&self) -> Posit {
        self.make(PositVal::Nar)
    }

    /// Largest-magnitude value with the given sign.
    pub fn maxval(&self, sign: bool) -> Posit {
        self.make(PositVal::NonZero(sign, self.rmax(), 0, Integer::from(1)))
    }

    /// Smallest-magnitude value with the given sign.
    pub fn minval(&self, sign: bool) -> Posit {
        self.make(PositVal::NonZero(sign, self.rmin(), 0, Integer::from(1)))
    }

    /// Largest positive value.
    pub fn maxpos(&self) -> Posit {
        self.maxval(false)
    }

    /// Smallest positive value.
    pub fn minpos(&self) -> Posit {
        self.minval(false)
    }

    /// Largest (closest to zero) negative value.
    pub fn maxneg(&self) -> Posit {
        self.minval(true)
    }

    /// Smallest (most negative) value.
    pub fn minneg(&self) -> Posit {
        self.maxval(true)
    }

    /// Decodes a raw pattern, panicking when it does not fit the
    /// width.
    pub fn bits_to_number(&self, bits: &Integer) -> Posit {
        self.try_bits_to_number(bits)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Decodes a raw pattern into its classified value. The two
    /// special patterns are all-zeros (zero) and `1` followed by
    /// zeros (NaR); every other negative pattern is the two's
    /// complement of its magnitude body.
    pub fn try_bits_to_number(&self, bits: &Integer) -> Result<Posit, Error> {
        if bits.is_negative() || bits.significant_bits() as usize > self.nbits {
            return Err(Error::UnexpectedEncoding);
        }
        let w = self.nbits - 1;
        let s = bits.get_bit(w as u32);
        let body = Integer::from(bits & bitmask(w));
        if body.is_zero() {
            return Ok(if s { self.nar() } else { self.zero() });
        }
        let body = if s {
            (Integer::from(1) << w as u32) - body
        } else {
            body
        };
        let (r, efield, c) = self.decode_body(&body);
        let fbits = c.significant_bits() as isize - 1;
        Ok(self.make(PositVal::NonZero(s, r, efield - fbits, c)))
    }

    // splits a positive magnitude body into regime, exponent value
    // (zero-padded to es bits), and significand with hidden one
    fn decode_body(&self, body: &Integer) -> (isize, isize, Integer) {
        let w = self.nbits - 1;
        let b0 = body.get_bit((w - 1) as u32);
        let mut run = 1;
        while run < w && body.get_bit((w - 1 - run) as u32) == b0 {
            run += 1;
        }
        let r = if b0 { run as isize - 1 } else { -(run as isize) };

        // run plus terminator, unless the run fills the body
        let used = (run + 1).min(w);
        let rem = w - used;
        let ebits = self.es.min(rem);
        let fbits = rem - ebits;
        let eraw = Integer::from(body >> fbits as u32) & bitmask(ebits);
        let efield = eraw.to_i64_wrapping() as isize;
        let efield = efield << (self.es - ebits);
        let frac = Integer::from(body & bitmask(fbits));
        let c = frac | (Integer::from(1) << fbits as u32);
        (r, efield, c)
    }

    /// Rounds a finite non-zero value into the format.
    fn round_finite<T: Real>(&self, num: &T) -> Posit {
        let s = num.is_negative().unwrap();
        let e = num.e().unwrap();

        // overflow saturates, never NaR
        if e > self.emax() {
            trace!(e, "posit overflow saturates at maxpos");
            return self.maxval(s);
        }
        // nonzero underflow stops at minpos, never zero
        if e < self.emin() {
            trace!(e, "posit underflow saturates at minpos");
            return self.minval(s);
        }

        let rscale = self.rscale();
        let k = e.div_euclid(rscale);
        let eb = e.rem_euclid(rscale) as usize;
        let kbits = if k < 0 { -k as usize } else { k as usize + 1 };

        // assemble the unbounded encoding: regime, terminator,
        // exponent, fraction
        let c = num.c().unwrap();
        let p = c.significant_bits() as usize;
        let fbits = p - 1;
        let frac = c & bitmask(fbits);
        let rfield = if k < 0 {
            Integer::from(1)
        } else {
            bitmask(kbits) << 1u32
        };
        let full = (rfield << (self.es + fbits) as u32)
            | (Integer::from(eb) << fbits as u32)
            | frac;
        let total = kbits + 1 + self.es + fbits;

        let body_len = self.nbits - 1;
        let body = if total <= body_len {
            // everything fits; the value is exact in this format
            full << (body_len - total) as u32
        } else {
            // round the discarded tail to nearest, ties to even
            let cut = total - body_len;
            let mut body = Integer::from(&full >> cut as u32);
            let g = full.get_bit((cut - 1) as u32);
            let sticky = !Integer::from(full & bitmask(cut - 1)).is_zero();
            if g && (sticky || body.is_odd()) {
                body += 1;
                if body.significant_bits() as usize > body_len {
                    // incremented past maxpos: saturate
                    body = bitmask(body_len);
                }
            }
            body
        };

        let (r, efield, c) = self.decode_body(&body);
        let fbits = c.significant_bits() as isize - 1;
        self.make(PositVal::NonZero(s, r, efield - fbits, c))
    }
}

impl RoundingContext for PositContext {
    type Format = Posit;

    fn round<T: Real>(&self, num: &T) -> Posit {
        if !num.is_numerical() {
            // NaN and both infinities collapse onto NaR
            self.nar()
        } else if num.is_infinite() {
            self.nar()
        } else if num.is_zero() {
            self.zero()
        } else {
            self.round_finite(num)
        }
    }
}
