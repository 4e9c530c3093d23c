/*!
Self-verification harness.

The drivers in this module prove an encoding configuration correct by
brute force: they enumerate every raw bit pattern (or sample uniformly
once the pair count exceeds a soft cap), run each operation through
the arithmetic core, recompute the same operation through MPFR at
higher precision with round-to-odd, and compare the resulting
encodings bit for bit. Two NaN results always match, payloads
ignored.

Conversion, monotonicity, sign-symmetry, and the areal interval law
have dedicated drivers. Results aggregate into a [`TestReport`] with
per-case failure records rendered in binary.
*/

mod harness;
mod oracle;
mod report;

pub use harness::{
    verify_areal_intervals, verify_binary_op, verify_conversion, verify_monotonicity,
    verify_sign_symmetry, verify_unary_op, BinaryOp, BitEncoding, EncodingOrder, UnaryOp,
    EXHAUSTIVE_CAP,
};
pub use report::{FailureRecord, TestReport};
