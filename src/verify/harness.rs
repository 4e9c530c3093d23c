use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rug::Integer;
use tracing::debug;

use crate::areal::{Areal, ArealContext};
use crate::blocktriple::BlockTriple;
use crate::cfloat::{Cfloat, CfloatContext};
use crate::posit::Posit;
use crate::ops::{RoundedAdd, RoundedDiv, RoundedMul, RoundedNeg, RoundedSqrt, RoundedSub};
use crate::posit::PositContext;
use crate::{Real, RoundingContext};

use super::oracle;
use super::report::{FailureRecord, TestReport};

/// Soft cap on the number of enumerated cases: configurations whose
/// full operand space fits below it are verified exhaustively, larger
/// ones are sampled uniformly at random.
pub const EXHAUSTIVE_CAP: usize = 1 << 20;

/// How the raw patterns of an encoding order its values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingOrder {
    /// Patterns read as two's complement integers ascend with value
    /// (posit).
    TwosComplement,
    /// Sign bit plus magnitude: positive patterns ascend, negative
    /// patterns descend (cfloat, areal).
    SignMagnitude,
}

/// The capability seam between the harness and a format: width,
/// decode, encode, and rendering. Everything else the drivers need
/// comes from [`Real`] on the format's values and from the rounded
/// operation traits on the context.
pub trait BitEncoding: RoundingContext {
    /// Total encoding width in bits.
    fn width(&self) -> usize;

    /// How raw patterns order values.
    fn order(&self) -> EncodingOrder;

    /// Decodes a raw pattern.
    fn decode(&self, bits: &Integer) -> Self::Format;

    /// Packs a value into its raw pattern.
    fn encode(&self, num: &Self::Format) -> Integer;

    /// Renders a value's pattern with field separators.
    fn render(&self, num: &Self::Format) -> String;
}

impl BitEncoding for CfloatContext {
    fn width(&self) -> usize {
        self.nbits()
    }

    fn order(&self) -> EncodingOrder {
        EncodingOrder::SignMagnitude
    }

    fn decode(&self, bits: &Integer) -> Cfloat {
        self.bits_to_number(bits)
    }

    fn encode(&self, num: &Cfloat) -> Integer {
        num.into_bits()
    }

    fn render(&self, num: &Cfloat) -> String {
        num.to_binary()
    }
}

impl BitEncoding for PositContext {
    fn width(&self) -> usize {
        self.nbits()
    }

    fn order(&self) -> EncodingOrder {
        EncodingOrder::TwosComplement
    }

    fn decode(&self, bits: &Integer) -> Posit {
        self.bits_to_number(bits)
    }

    fn encode(&self, num: &Posit) -> Integer {
        num.clone().into_bits()
    }

    fn render(&self, num: &Posit) -> String {
        num.to_binary()
    }
}

impl BitEncoding for ArealContext {
    fn width(&self) -> usize {
        self.nbits()
    }

    fn order(&self) -> EncodingOrder {
        EncodingOrder::SignMagnitude
    }

    fn decode(&self, bits: &Integer) -> Areal {
        self.bits_to_number(bits)
    }

    fn encode(&self, num: &Areal) -> Integer {
        num.into_bits()
    }

    fn render(&self, num: &Areal) -> String {
        num.to_binary()
    }
}

/// Binary operations the harness can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// Unary operations the harness can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Sqrt,
}

impl UnaryOp {
    fn name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "neg",
            UnaryOp::Sqrt => "sqrt",
        }
    }
}

// both sides NaN counts as a match, payloads ignored
fn matches_reference<C>(ctx: &C, computed: &C::Format, reference: &C::Format) -> bool
where
    C: BitEncoding,
    C::Format: Real,
{
    if !computed.is_numerical() && !reference.is_numerical() {
        return true;
    }
    ctx.encode(computed) == ctx.encode(reference)
}

/// Verifies one binary operation of a configuration against the MPFR
/// reference: exhaustively over all operand pairs when their count
/// fits [`EXHAUSTIVE_CAP`], otherwise over uniformly sampled pairs.
pub fn verify_binary_op<C>(ctx: &C, op: BinaryOp, tag: impl Into<String>) -> TestReport
where
    C: BitEncoding + RoundedAdd + RoundedSub + RoundedMul + RoundedDiv,
    C::Format: Real,
{
    let mut report = TestReport::new(tag);
    let nbits = ctx.width();
    let p = nbits + 3;

    let mut run = |ia: &Integer, ib: &Integer| {
        let a = ctx.decode(ia);
        let b = ctx.decode(ib);
        let ta = BlockTriple::from_number(&a);
        let tb = BlockTriple::from_number(&b);
        let computed = match op {
            BinaryOp::Add => ctx.add(&a, &b),
            BinaryOp::Sub => ctx.sub(&a, &b),
            BinaryOp::Mul => ctx.mul(&a, &b),
            BinaryOp::Div => ctx.div(&a, &b),
        };
        let exact = match op {
            BinaryOp::Add => oracle::ref_add(&ta, &tb, p),
            BinaryOp::Sub => oracle::ref_sub(&ta, &tb, p),
            BinaryOp::Mul => oracle::ref_mul(&ta, &tb, p),
            BinaryOp::Div => oracle::ref_div(&ta, &tb, p),
        };
        let reference = ctx.round(&exact);
        if matches_reference(ctx, &computed, &reference) {
            report.pass();
        } else {
            report.fail(FailureRecord {
                op: op.name(),
                operands: vec![ctx.render(&a), ctx.render(&b)],
                computed: ctx.render(&computed),
                reference: ctx.render(&reference),
            });
        }
    };

    if nbits * 2 < usize::BITS as usize && (1usize << (2 * nbits)) <= EXHAUSTIVE_CAP {
        debug!(nbits, "exhaustive binary-op sweep");
        for i in 0..(1u64 << nbits) {
            let ia = Integer::from(i);
            for j in 0..(1u64 << nbits) {
                run(&ia, &Integer::from(j));
            }
        }
    } else {
        debug!(nbits, samples = EXHAUSTIVE_CAP, "randomized binary-op sweep");
        let mut rng = StdRng::seed_from_u64(0x5eed_0000 + nbits as u64);
        for _ in 0..EXHAUSTIVE_CAP {
            let ia = random_bits(&mut rng, nbits);
            let ib = random_bits(&mut rng, nbits);
            run(&ia, &ib);
        }
    }
    report
}

/// Verifies one unary operation of a configuration against the MPFR
/// reference.
pub fn verify_unary_op<C>(ctx: &C, op: UnaryOp, tag: impl Into<String>) -> TestReport
where
    C: BitEncoding + RoundedNeg + RoundedSqrt,
    C::Format: Real,
{
    let mut report = TestReport::new(tag);
    let nbits = ctx.width();
    let p = nbits + 3;

    let mut run = |ia: &Integer| {
        let a = ctx.decode(ia);
        let ta = BlockTriple::from_number(&a);
        let computed = match op {
            UnaryOp::Neg => ctx.neg(&a),
            UnaryOp::Sqrt => ctx.sqrt(&a),
        };
        let exact = match op {
            UnaryOp::Neg => oracle::ref_neg(&ta),
            UnaryOp::Sqrt => oracle::ref_sqrt(&ta, p),
        };
        let reference = ctx.round(&exact);
        if matches_reference(ctx, &computed, &reference) {
            report.pass();
        } else {
            report.fail(FailureRecord {
                op: op.name(),
                operands: vec![ctx.render(&a)],
                computed: ctx.render(&computed),
                reference: ctx.render(&reference),
            });
        }
    };

    if nbits < usize::BITS as usize && (1usize << nbits) <= EXHAUSTIVE_CAP {
        for i in 0..(1u64 << nbits) {
            run(&Integer::from(i));
        }
    } else {
        let mut rng = StdRng::seed_from_u64(0x5eed_1000 + nbits as u64);
        for _ in 0..EXHAUSTIVE_CAP {
            run(&random_bits(&mut rng, nbits));
        }
    }
    report
}

/// Verifies the conversion cycle of every encoding: decode, convert
/// to `f64`, re-assign, and compare against the canonical re-encoding
/// of the original. Patterns whose value does not fit an `f64`
/// exactly are skipped.
pub fn verify_conversion<C>(ctx: &C, tag: impl Into<String>) -> TestReport
where
    C: BitEncoding,
    C::Format: Real,
{
    let mut report = TestReport::new(tag);
    let nbits = ctx.width();

    let mut run = |ia: &Integer| {
        let x = ctx.decode(ia);
        if !x.is_finite() {
            // NaN payloads do not survive an f64 cycle, and saturating
            // configurations assign infinities lossily by design
            return;
        }
        let t = BlockTriple::from_number(&x);
        let d = t.to_f64();
        let back = BlockTriple::from(d);
        if back != t {
            // not exactly representable as f64
            return;
        }
        let assigned = ctx.round(&back);
        let expected = ctx.encode(&x);
        let got = ctx.encode(&assigned);
        // zero signs must survive the cycle bitwise
        let sign_ok = !t.is_zero() || assigned.sign() == x.sign();
        if got == expected && sign_ok {
            report.pass();
        } else {
            report.fail(FailureRecord {
                op: "from_f64(to_f64)",
                operands: vec![ctx.render(&x)],
                computed: ctx.render(&assigned),
                reference: ctx.render(&x),
            });
        }
    };

    if nbits < usize::BITS as usize && (1usize << nbits) <= EXHAUSTIVE_CAP {
        for i in 0..(1u64 << nbits) {
            run(&Integer::from(i));
        }
    } else {
        let mut rng = StdRng::seed_from_u64(0x5eed_2000 + nbits as u64);
        for _ in 0..EXHAUSTIVE_CAP {
            run(&random_bits(&mut rng, nbits));
        }
    }
    report
}

/// Verifies that walking the encodings in signed order visits values
/// in strictly increasing order (NaN and the duplicate zero skipped).
pub fn verify_monotonicity<C>(ctx: &C, tag: impl Into<String>) -> TestReport
where
    C: BitEncoding,
    C::Format: Real,
{
    let mut report = TestReport::new(tag);
    let nbits = ctx.width();
    assert!(
        nbits < usize::BITS as usize && (1usize << nbits) <= EXHAUSTIVE_CAP,
        "monotonicity is an exhaustive-only driver"
    );

    let mut prev: Option<(String, BlockTriple, Integer)> = None;
    for bits in signed_order(ctx.order(), nbits) {
        let x = ctx.decode(&bits);
        let t = BlockTriple::from_number(&x);
        if t.is_nan() {
            continue;
        }
        let canonical = ctx.encode(&x);
        if let Some((prev_render, prev_t, prev_canonical)) = &prev {
            let ok = match prev_t.partial_cmp(&t) {
                Some(std::cmp::Ordering::Less) => true,
                // the two zeros meet in the middle of the walk, and
                // dead-band patterns may snap onto one canonical value
                Some(std::cmp::Ordering::Equal) => {
                    (prev_t.is_zero() && t.is_zero()) || *prev_canonical == canonical
                }
                _ => false,
            };
            if ok {
                report.pass();
            } else {
                report.fail(FailureRecord {
                    op: "<",
                    operands: vec![prev_render.clone(), ctx.render(&x)],
                    computed: format!("{:?}", prev_t.partial_cmp(&t)),
                    reference: "Less".to_string(),
                });
            }
        }
        prev = Some((ctx.render(&x), t, canonical));
    }
    report
}

/// Verifies `-(-x) == x` bitwise for every finite non-zero encoding.
pub fn verify_sign_symmetry<C>(ctx: &C, tag: impl Into<String>) -> TestReport
where
    C: BitEncoding + RoundedNeg,
    C::Format: Real,
{
    let mut report = TestReport::new(tag);
    let nbits = ctx.width();

    let mut run = |ia: &Integer| {
        let x = ctx.decode(ia);
        if !x.is_numerical() || x.is_zero() {
            return;
        }
        let y = ctx.neg(&x);
        let z = ctx.neg(&y);
        if ctx.encode(&z) == ctx.encode(&x) {
            report.pass();
        } else {
            report.fail(FailureRecord {
                op: "neg(neg)",
                operands: vec![ctx.render(&x)],
                computed: ctx.render(&z),
                reference: ctx.render(&x),
            });
        }
    };

    if nbits < usize::BITS as usize && (1usize << nbits) <= EXHAUSTIVE_CAP {
        for i in 0..(1u64 << nbits) {
            run(&Integer::from(i));
        }
    } else {
        let mut rng = StdRng::seed_from_u64(0x5eed_3000 + nbits as u64);
        for _ in 0..EXHAUSTIVE_CAP {
            run(&random_bits(&mut rng, nbits));
        }
    }
    report
}

/// Verifies the areal interval law by enumeration: every exact value
/// `v` must assign from `v` exactly, and probes half a step to either
/// side must land on the neighboring interval encodings.
pub fn verify_areal_intervals(ctx: &ArealContext, tag: impl Into<String>) -> TestReport {
    let mut report = TestReport::new(tag);
    let nbits = ctx.nbits();
    assert!(
        nbits <= 20,
        "interval enumeration is meant for small configurations"
    );

    let minpos = ctx.minpos().to_f64();

    let mut check = |test_value: f64, expected: &Areal| {
        let nut = ctx.round(&BlockTriple::from(test_value));
        if nut.into_bits() == expected.into_bits() {
            report.pass();
        } else {
            report.fail(FailureRecord {
                op: "=",
                operands: vec![format!("{:e}", test_value)],
                computed: nut.to_binary(),
                reference: expected.to_binary(),
            });
        }
    };

    for i in (0..(1u64 << nbits)).step_by(2) {
        let current = ctx.bits_to_number(&Integer::from(i));
        let interval = ctx.bits_to_number(&Integer::from(i | 1));
        if current.is_nar() {
            continue;
        }
        let da = current.to_f64();

        if current.is_zero() {
            // between zero and minpos, probing a quarter step in
            let delta = minpos / 4.0;
            check(da, &current);
            if current.sign() {
                check(da - delta, &interval);
            } else {
                check(da + delta, &interval);
            }
        } else {
            // the interval between this exact value and the next is
            // one ulp wide; probe its midpoint on both sides
            let prev = ctx.bits_to_number(&Integer::from(i - 2));
            let prev_interval = ctx.bits_to_number(&Integer::from(i - 1));
            if !prev.is_nar() {
                let delta = (da - prev.to_f64()) / 2.0;
                check(da - delta, &prev_interval);
                check(da, &current);
                if !interval.is_nar() {
                    check(da + delta, &interval);
                }
            }
        }
    }
    report
}

fn random_bits(rng: &mut StdRng, nbits: usize) -> Integer {
    let mut bits = Integer::new();
    let mut remaining = nbits;
    while remaining > 0 {
        let take = remaining.min(32);
        let chunk = rng.gen_range(0..(1u64 << take));
        bits = (bits << take as u32) | Integer::from(chunk);
        remaining -= take;
    }
    bits
}

// patterns in ascending value order for the given encoding layout
fn signed_order(order: EncodingOrder, nbits: usize) -> Vec<Integer> {
    let half = 1u64 << (nbits - 1);
    let mut out = Vec::with_capacity(1 << nbits);
    match order {
        EncodingOrder::TwosComplement => {
            // negative patterns ascend from the most negative
            for i in half..(half << 1) {
                out.push(Integer::from(i));
            }
            for i in 0..half {
                out.push(Integer::from(i));
            }
        }
        EncodingOrder::SignMagnitude => {
            // negatives walk magnitude downward
            for i in (half..(half << 1)).rev() {
                out.push(Integer::from(i));
            }
            for i in 0..half {
                out.push(Integer::from(i));
            }
        }
    }
    out
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
