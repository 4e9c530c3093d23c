// The MPFR reference.
//
// Each operation is recomputed through rug (MPFR) at the caller's
// digit budget using the round-to-odd emulation: compute one digit
// short with round-toward-zero, then append a digit holding the
// ternary (inexactness) flag. The emulated result re-rounds exactly
// in any standard mode at two fewer digits, which is how the harness
// pushes it through the same format context as the value under test.
// This path shares no code with the BlockTriple kernels, so a
// disagreement implicates one side or the other, never both.

use rug::float::Round;
use rug::Float;

use crate::blocktriple::BlockTriple;

// widens a triple into an exact MPFR value
fn to_float(x: &BlockTriple) -> Float {
    Float::from(x.clone())
}

// round-to-odd correction: the result was computed at `p - 1` digits
// toward zero; append one digit recording inexactness
fn with_ternary(f: Float, t: std::cmp::Ordering) -> BlockTriple {
    match BlockTriple::from(f) {
        BlockTriple::Normal(s, exp, c) => {
            let mut c = c.zext(c.nbits() + 1).shl(1);
            if t != std::cmp::Ordering::Equal {
                c.set(0, true).unwrap();
            }
            BlockTriple::Normal(s, exp - 1, c)
        }
        other => other,
    }
}

/// Reference negation (exact).
pub fn ref_neg(a: &BlockTriple) -> BlockTriple {
    a.neg()
}

/// Reference addition at `p` digits, round-to-odd.
pub fn ref_add(a: &BlockTriple, b: &BlockTriple, p: usize) -> BlockTriple {
    let (fa, fb) = (to_float(a), to_float(b));
    let (f, t) = Float::with_val_round((p - 1) as u32, &fa + &fb, Round::Zero);
    with_ternary(f, t)
}

/// Reference subtraction at `p` digits, round-to-odd.
pub fn ref_sub(a: &BlockTriple, b: &BlockTriple, p: usize) -> BlockTriple {
    let (fa, fb) = (to_float(a), to_float(b));
    let (f, t) = Float::with_val_round((p - 1) as u32, &fa - &fb, Round::Zero);
    with_ternary(f, t)
}

/// Reference multiplication at `p` digits, round-to-odd.
pub fn ref_mul(a: &BlockTriple, b: &BlockTriple, p: usize) -> BlockTriple {
    let (fa, fb) = (to_float(a), to_float(b));
    let (f, t) = Float::with_val_round((p - 1) as u32, &fa * &fb, Round::Zero);
    with_ternary(f, t)
}

/// Reference division at `p` digits, round-to-odd.
pub fn ref_div(a: &BlockTriple, b: &BlockTriple, p: usize) -> BlockTriple {
    let (fa, fb) = (to_float(a), to_float(b));
    let (f, t) = Float::with_val_round((p - 1) as u32, &fa / &fb, Round::Zero);
    with_ternary(f, t)
}

/// Reference square root at `p` digits, round-to-odd.
pub fn ref_sqrt(a: &BlockTriple, p: usize) -> BlockTriple {
    let fa = to_float(a);
    let (f, t) = Float::with_val_round((p - 1) as u32, fa.sqrt_ref(), Round::Zero);
    with_ternary(f, t)
}
