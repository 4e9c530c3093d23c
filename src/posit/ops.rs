// Arithmetic dispatch for posits. NaR absorbs every exceptional
// outcome: NaN propagation, infinities, and division by zero all
// round onto the single exception value, while finite overflow and
// underflow saturate inside the rounding path.

use crate::blocktriple::BlockTriple;
use crate::ops::{RoundedAdd, RoundedDiv, RoundedMul, RoundedNeg, RoundedSqrt, RoundedSub};
use crate::posit::{Posit, PositContext};
use crate::{Real, RoundingContext};

impl PositContext {
    // enough digits that re-rounding the odd-rounded kernel result is
    // exact at every regime's precision
    fn kernel_p(&self) -> usize {
        self.nbits() + 3
    }
}

impl RoundedNeg for PositContext {
    fn neg<N: Real>(&self, src: &N) -> Posit {
        let x = BlockTriple::from_number(src);
        self.round(&x.neg())
    }
}

impl RoundedAdd for PositContext {
    fn add<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Posit {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        self.round(&BlockTriple::add(&a, &b))
    }
}

impl RoundedSub for PositContext {
    fn sub<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Posit {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        self.round(&BlockTriple::sub(&a, &b))
    }
}

impl RoundedMul for PositContext {
    fn mul<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Posit {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        self.round(&BlockTriple::mul(&a, &b))
    }
}

impl RoundedDiv for PositContext {
    fn div<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Posit {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        self.round(&BlockTriple::div(&a, &b, self.kernel_p()))
    }
}

impl RoundedSqrt for PositContext {
    fn sqrt<N: Real>(&self, src: &N) -> Posit {
        let x = BlockTriple::from_number(src);
        self.round(&BlockTriple::sqrt(&x, self.kernel_p()))
    }
}

impl PositContext {
    /// Rounded negation.
    pub fn neg(&self, src: &Posit) -> Posit {
        <Self as RoundedNeg>::neg(self, src)
    }

    /// Rounded addition.
    pub fn add(&self, src1: &Posit, src2: &Posit) -> Posit {
        <Self as RoundedAdd>::add(self, src1, src2)
    }

    /// Rounded subtraction.
    pub fn sub(&self, src1: &Posit, src2: &Posit) -> Posit {
        <Self as RoundedSub>::sub(self, src1, src2)
    }

    /// Rounded multiplication.
    pub fn mul(&self, src1: &Posit, src2: &Posit) -> Posit {
        <Self as RoundedMul>::mul(self, src1, src2)
    }

    /// Rounded division. Division by zero is NaR.
    pub fn div(&self, src1: &Posit, src2: &Posit) -> Posit {
        <Self as RoundedDiv>::div(self, src1, src2)
    }

    /// Rounded square root. Negative arguments produce NaR.
    pub fn sqrt(&self, src: &Posit) -> Posit {
        <Self as RoundedSqrt>::sqrt(self, src)
    }
}
