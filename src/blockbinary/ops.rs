// Arithmetic, shifts, and comparisons for BlockBinary.
//
// All binary operations require operands of equal width and wrap
// within that width; the right shift is arithmetic. Division is the
// one fallible operation.

use std::cmp::Ordering;
use std::ops::{Add, BitAnd, BitOr, BitXor, Mul, Neg, Not, Shl, Shr, Sub};

use crate::error::Error;

use super::number::{BlockBinary, BlockType};

impl<B: BlockType> BlockBinary<B> {
    fn assert_same_width(&self, rhs: &Self) {
        assert!(
            self.nbits() == rhs.nbits(),
            "operands must have equal widths, given {} and {}",
            self.nbits(),
            rhs.nbits()
        );
    }

    /// Exact sum modulo `2^nbits`: limb-wise ripple add, upper bits
    /// masked away.
    pub fn add(&self, rhs: &Self) -> Self {
        self.assert_same_width(rhs);
        let mut result = self.clone();
        result.ripple_add(rhs, false);
        result.mask_top();
        result
    }

    /// Exact difference modulo `2^nbits`.
    pub fn sub(&self, rhs: &Self) -> Self {
        self.assert_same_width(rhs);
        let mut result = self.clone();
        result.ripple_add(&rhs.clone().complement(), true);
        result.mask_top();
        result
    }

    /// Two's complement negation (wraps for the most negative value).
    pub fn twos_complement(&self) -> Self {
        let mut result = self.clone().complement();
        let one = Self::from_u64(self.nbits(), 1);
        result.ripple_add(&one, false);
        result.mask_top();
        result
    }

    // limb-wise a += b + carry_in
    fn ripple_add(&mut self, rhs: &Self, carry_in: bool) {
        let mut carry = carry_in;
        for (a, b) in self.limbs_mut().iter_mut().zip(rhs.limbs_ref()) {
            let s1 = a.wrapping_add(b);
            let c1 = s1 < *a;
            let s2 = if carry { s1.wrapping_add(&B::one()) } else { s1 };
            let c2 = carry && s2 == B::zero();
            *a = s2;
            carry = c1 || c2;
        }
    }

    /// Schoolbook product truncated to `nbits`. Widen both operands
    /// first to keep the full double-width product.
    pub fn mul(&self, rhs: &Self) -> Self {
        self.assert_same_width(rhs);
        let n = self.limb_count();
        let mut acc = vec![0u128; n];
        for i in 0..n {
            let ai = self.limbs_ref()[i].to_u64() as u128;
            if ai == 0 {
                continue;
            }
            let mut carry = 0u128;
            for j in 0..(n - i) {
                let bj = rhs.limbs_ref()[j].to_u64() as u128;
                let t = acc[i + j] + ai * bj + carry;
                acc[i + j] = t & ((1u128 << B::BITS) - 1);
                carry = t >> B::BITS;
            }
        }
        let mut result = Self::new(self.nbits());
        for (limb, a) in result.limbs_mut().iter_mut().zip(acc) {
            *limb = B::from_u64(a as u64);
        }
        result.mask_top();
        result
    }

    /// Signed division truncating toward zero.
    pub fn div(&self, rhs: &Self) -> Result<Self, Error> {
        Ok(self.divmod(rhs)?.0)
    }

    /// Signed remainder; same sign as the dividend.
    pub fn rem(&self, rhs: &Self) -> Result<Self, Error> {
        Ok(self.divmod(rhs)?.1)
    }

    /// Signed division with remainder, truncating toward zero.
    pub fn divmod(&self, rhs: &Self) -> Result<(Self, Self), Error> {
        self.assert_same_width(rhs);
        if rhs.is_zero() {
            return Err(Error::DivideByZero);
        }
        let sa = self.is_negative();
        let sb = rhs.is_negative();
        let a = if sa { self.twos_complement() } else { self.clone() };
        let b = if sb { rhs.twos_complement() } else { rhs.clone() };
        let (q, r) = a.udivmod(&b);
        let q = if sa != sb { q.twos_complement() } else { q };
        let r = if sa { r.twos_complement() } else { r };
        Ok((q, r))
    }

    /// Restoring long division on unsigned magnitudes.
    /// Both operands and results are read as unsigned patterns.
    pub fn udivmod(&self, rhs: &Self) -> (Self, Self) {
        self.assert_same_width(rhs);
        assert!(!rhs.is_zero(), "unsigned division by zero");
        // one spare bit so the partial remainder never wraps
        let w = self.nbits() + 1;
        let a = self.zext(w);
        let b = rhs.zext(w);
        let mut q = Self::new(w);
        let mut r = Self::new(w);
        for i in (0..a.significant_bits()).rev() {
            r = r.shl(1);
            if a.get(i).unwrap() {
                r.set(0, true).unwrap();
            }
            if r.ucmp(&b) != Ordering::Less {
                r = r.sub(&b);
                q.set(i, true).unwrap();
            }
        }
        (q.zext(self.nbits()), r.zext(self.nbits()))
    }

    /// Left shift by `k` bits; bits shifted past `nbits - 1` are lost.
    pub fn shl(&self, k: usize) -> Self {
        if k >= self.nbits() {
            return Self::new(self.nbits());
        }
        let v = self.to_unsigned() << k as u32;
        Self::from_integer(self.nbits(), &v)
    }

    /// Arithmetic right shift by `k` bits: vacated positions take the
    /// sign bit.
    pub fn shr(&self, k: usize) -> Self {
        let sign = self.is_negative();
        if k >= self.nbits() {
            return if sign {
                Self::all_ones(self.nbits())
            } else {
                Self::new(self.nbits())
            };
        }
        let mut result = self.lshr(k);
        if sign {
            for i in (self.nbits() - k)..self.nbits() {
                result.set(i, true).unwrap();
            }
        }
        result
    }

    /// Logical right shift by `k` bits: vacated positions are zero.
    /// The shift of choice on unsigned magnitudes.
    pub fn lshr(&self, k: usize) -> Self {
        if k >= self.nbits() {
            return Self::new(self.nbits());
        }
        let v = self.to_unsigned() >> k as u32;
        Self::from_integer(self.nbits(), &v)
    }

    // bitwise complement within the width
    fn complement(mut self) -> Self {
        for limb in self.limbs_mut() {
            *limb = !*limb;
        }
        self.mask_top();
        self
    }

    /// Unsigned comparison of the raw patterns.
    pub fn ucmp(&self, rhs: &Self) -> Ordering {
        self.assert_same_width(rhs);
        for (a, b) in self.limbs_ref().iter().rev().zip(rhs.limbs_ref().iter().rev()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Returns true if any bit in positions `[0, k)` is set.
    /// Used to fold discarded digits into a sticky bit.
    pub fn any_below(&self, k: usize) -> bool {
        let k = k.min(self.nbits());
        (0..k).any(|i| self.get(i).unwrap())
    }

    fn bitwise(mut self, rhs: &Self, f: impl Fn(B, B) -> B) -> Self {
        self.assert_same_width(rhs);
        for (a, b) in self.limbs_mut().iter_mut().zip(rhs.limbs_ref()) {
            *a = f(*a, *b);
        }
        self.mask_top();
        self
    }
}

// signed ordering
impl<B: BlockType> PartialOrd for BlockBinary<B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<B: BlockType> Ord for BlockBinary<B> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // same sign: two's complement patterns order unsigned
            _ => self.ucmp(other),
        }
    }
}

impl<B: BlockType> Add for &BlockBinary<B> {
    type Output = BlockBinary<B>;

    fn add(self, rhs: Self) -> Self::Output {
        BlockBinary::add(self, rhs)
    }
}

impl<B: BlockType> Sub for &BlockBinary<B> {
    type Output = BlockBinary<B>;

    fn sub(self, rhs: Self) -> Self::Output {
        BlockBinary::sub(self, rhs)
    }
}

impl<B: BlockType> Mul for &BlockBinary<B> {
    type Output = BlockBinary<B>;

    fn mul(self, rhs: Self) -> Self::Output {
        BlockBinary::mul(self, rhs)
    }
}

impl<B: BlockType> Neg for &BlockBinary<B> {
    type Output = BlockBinary<B>;

    fn neg(self) -> Self::Output {
        self.twos_complement()
    }
}

impl<B: BlockType> Not for BlockBinary<B> {
    type Output = BlockBinary<B>;

    fn not(self) -> Self::Output {
        self.complement()
    }
}

impl<B: BlockType> Shl<usize> for &BlockBinary<B> {
    type Output = BlockBinary<B>;

    fn shl(self, k: usize) -> Self::Output {
        BlockBinary::shl(self, k)
    }
}

impl<B: BlockType> Shr<usize> for &BlockBinary<B> {
    type Output = BlockBinary<B>;

    fn shr(self, k: usize) -> Self::Output {
        BlockBinary::shr(self, k)
    }
}

impl<B: BlockType> BitAnd for &BlockBinary<B> {
    type Output = BlockBinary<B>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.clone().bitwise(rhs, |a, b| a & b)
    }
}

impl<B: BlockType> BitOr for &BlockBinary<B> {
    type Output = BlockBinary<B>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.clone().bitwise(rhs, |a, b| a | b)
    }
}

impl<B: BlockType> BitXor for &BlockBinary<B> {
    type Output = BlockBinary<B>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.clone().bitwise(rhs, |a, b| a ^ b)
    }
}
