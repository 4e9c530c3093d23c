// Utility functions shared by the rounding and packing paths.

use rug::Integer;

/// Produces a bitmask (as an [`Integer`]) encoding `(1 << n) - 1`
/// which can be used to extract the first `n` binary digits.
pub(crate) fn bitmask(n: usize) -> Integer {
    (Integer::from(1) << n as u32) - 1
}
