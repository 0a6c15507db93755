//! # Modular Exponentiation
//!
//! `base^exp mod (1e9 + 7)` by repeated squaring.

use crate::domain::errors::CommandError;

/// The prime modulus, 1e9 + 7.
pub const MODULUS: i64 = 1_000_000_007;

/// Compute `base^exp mod MODULUS`, always in `[0, MODULUS)`.
///
/// Negative bases are reduced with the Euclidean remainder, so
/// `power(-2, 3) == MODULUS - 8`. Negative exponents are rejected.
/// `power(0, 0) == 1`.
pub fn power(base: i64, exp: i64) -> Result<i64, CommandError> {
    if exp < 0 {
        return Err(CommandError::NegativeExponent(exp));
    }

    // Both factors stay below MODULUS, so every product fits in 60 bits.
    let modulus = MODULUS as u64;
    let mut base = base.rem_euclid(MODULUS) as u64;
    let mut exp = exp as u64;
    let mut acc: u64 = 1;

    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }

    Ok(acc as i64)
}
