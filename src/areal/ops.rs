// Arithmetic dispatch for areal. Operands contribute their numeric
// reading (exact value or interval midpoint); the kernel result is
// re-assigned through the context, which captures any inexactness in
// the result's ubit.

use crate::areal::{Areal, ArealContext};
use crate::blocktriple::BlockTriple;
use crate::ops::{RoundedAdd, RoundedDiv, RoundedMul, RoundedNeg, RoundedSqrt, RoundedSub};
use crate::{Real, RoundingContext};

impl ArealContext {
    fn kernel_p(&self) -> usize {
        self.max_p() + 3
    }
}

impl RoundedNeg for ArealContext {
    fn neg<N: Real>(&self, src: &N) -> Areal {
        let x = BlockTriple::from_number(src);
        self.round(&x.neg())
    }
}

impl RoundedAdd for ArealContext {
    fn add<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Areal {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        self.round(&BlockTriple::add(&a, &b))
    }
}

impl RoundedSub for ArealContext {
    fn sub<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Areal {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        self.round(&BlockTriple::sub(&a, &b))
    }
}

impl RoundedMul for ArealContext {
    fn mul<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Areal {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        self.round(&BlockTriple::mul(&a, &b))
    }
}

impl RoundedDiv for ArealContext {
    fn div<N1: Real, N2: Real>(&self, src1: &N1, src2: &N2) -> Areal {
        let a = BlockTriple::from_number(src1);
        let b = BlockTriple::from_number(src2);
        self.round(&BlockTriple::div(&a, &b, self.kernel_p()))
    }
}

impl RoundedSqrt for ArealContext {
    fn sqrt<N: Real>(&self, src: &N) -> Areal {
        let x = BlockTriple::from_number(src);
        self.round(&BlockTriple::sqrt(&x, self.kernel_p()))
    }
}

impl ArealContext {
    /// Negation.
    pub fn neg(&self, src: &Areal) -> Areal {
        <Self as RoundedNeg>::neg(self, src)
    }

    /// Addition with ubit capture.
    pub fn add(&self, src1: &Areal, src2: &Areal) -> Areal {
        <Self as RoundedAdd>::add(self, src1, src2)
    }

    /// Subtraction with ubit capture.
    pub fn sub(&self, src1: &Areal, src2: &Areal) -> Areal {
        <Self as RoundedSub>::sub(self, src1, src2)
    }

    /// Multiplication with ubit capture.
    pub fn mul(&self, src1: &Areal, src2: &Areal) -> Areal {
        <Self as RoundedMul>::mul(self, src1, src2)
    }

    /// Division with ubit capture.
    pub fn div(&self, src1: &Areal, src2: &Areal) -> Areal {
        <Self as RoundedDiv>::div(self, src1, src2)
    }

    /// Square root with ubit capture. Negative arguments produce NaN.
    pub fn sqrt(&self, src: &Areal) -> Areal {
        <Self as RoundedSqrt>::sqrt(self, src)
    }
}
