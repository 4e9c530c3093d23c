// Arithmetic dispatch for cfloat: decode to the working triple,
// run the exact kernel, round, and record exception flags.

use crate::blocktriple::BlockTriple;
use crate::cfloat::{Cfloat, CfloatContext};
use crate::error::Error;
use crate::ops::{RoundedAdd, RoundedDiv, RoundedMul, RoundedNeg, RoundedSqrt, RoundedSub};
use crate::{Real, RoundingContext};

impl CfloatContext {
    // digit budget for the odd-rounded kernels; two spare digits make
    // the re-rounding exact, the third keeps the sticky separate
    fn kernel_p(&self) -> usize {
        self.max_p() + 3
    }

    fn finish(&self, result: BlockTriple, invalid: bool, divzero: bool) -> Cfloat {
        let mut rounded = self.round(&result);
        rounded.flags.invalid = invalid;
        rounded.flags.divzero = divzero;
        rounded
    }
}

impl RoundedNeg for CfloatContext {
    fn neg<N: Real>(&self, src: &N) -> Cfloat {
        let x = BlockTriple::from_number(src);
        self.round(&x.neg())
    }
}

impl RoundedAdd for CfloatContext {
    fn add<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Cfloat {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        let r = BlockTriple::add(&a, &b);
        let invalid = r.is_nan() && a.is_numerical() && b.is_numerical();
        self.finish(r, invalid, false)
    }
}

impl RoundedSub for CfloatContext {
    fn sub<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Cfloat {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        let r = BlockTriple::sub(&a, &b);
        let invalid = r.is_nan() && a.is_numerical() && b.is_numerical();
        self.finish(r, invalid, false)
    }
}

impl RoundedMul for CfloatContext {
    fn mul<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Cfloat {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        let r = BlockTriple::mul(&a, &b);
        let invalid = r.is_nan() && a.is_numerical() && b.is_numerical();
        self.finish(r, invalid, false)
    }
}

impl RoundedDiv for CfloatContext {
    fn div<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Cfloat {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        let r = BlockTriple::div(&a, &b, self.kernel_p());
        let invalid = r.is_nan() && a.is_numerical() && b.is_numerical();
        let divzero = b.is_zero() && !a.is_zero() && a.is_finite();
        self.finish(r, invalid, divzero)
    }
}

impl RoundedSqrt for CfloatContext {
    fn sqrt<N: Real>(&self, src: &N) -> Cfloat {
        let x = BlockTriple::from_number(src);
        let r = BlockTriple::sqrt(&x, self.kernel_p());
        let invalid = r.is_nan() && x.is_numerical();
        self.finish(r, invalid, false)
    }
}

impl CfloatContext {
    /// Rounded negation.
    pub fn neg(&self, src: &Cfloat) -> Cfloat {
        <Self as RoundedNeg>::neg(self, src)
    }

    /// Rounded addition.
    pub fn add(&self, src1: &Cfloat, src2: &Cfloat) -> Cfloat {
        <Self as RoundedAdd>::add(self, src1, src2)
    }

    /// Rounded subtraction.
    pub fn sub(&self, src1: &Cfloat, src2: &Cfloat) -> Cfloat {
        <Self as RoundedSub>::sub(self, src1, src2)
    }

    /// Rounded multiplication.
    pub fn mul(&self, src1: &Cfloat, src2: &Cfloat) -> Cfloat {
        <Self as RoundedMul>::mul(self, src1, src2)
    }

    /// Rounded division.
    pub fn div(&self, src1: &Cfloat, src2: &Cfloat) -> Cfloat {
        <Self as RoundedDiv>::div(self, src1, src2)
    }

    /// Rounded square root.
    pub fn sqrt(&self, src: &Cfloat) -> Cfloat {
        <Self as RoundedSqrt>::sqrt(self, src)
    }

    /// Addition that surfaces invalid-operation and overflow as
    /// errors instead of silently producing NaN or a clamped value.
    pub fn checked_add(&self, src1: &Cfloat, src2: &Cfloat) -> Result<Cfloat, Error> {
        Self::checked(self.add(src1, src2))
    }

    /// Fallible subtraction; see
    /// [`checked_add`][CfloatContext::checked_add].
    pub fn checked_sub(&self, src1: &Cfloat, src2: &Cfloat) -> Result<Cfloat, Error> {
        Self::checked(self.sub(src1, src2))
    }

    /// Fallible multiplication.
    pub fn checked_mul(&self, src1: &Cfloat, src2: &Cfloat) -> Result<Cfloat, Error> {
        Self::checked(self.mul(src1, src2))
    }

    /// Fallible division; division of a finite nonzero value by zero
    /// is reported as [`Error::DivideByZero`].
    pub fn checked_div(&self, src1: &Cfloat, src2: &Cfloat) -> Result<Cfloat, Error> {
        let v = self.div(src1, src2);
        if v.flags.divzero {
            return Err(Error::DivideByZero);
        }
        Self::checked(v)
    }

    /// Fallible square root.
    pub fn checked_sqrt(&self, src: &Cfloat) -> Result<Cfloat, Error> {
        Self::checked(self.sqrt(src))
    }

    fn checked(v: Cfloat) -> Result<Cfloat, Error> {
        if v.flags.invalid {
            Err(Error::InvalidOperation)
        } else if v.flags.overflow {
            Err(Error::ArithmeticOverflow)
        } else {
            Ok(v)
        }
    }
}
