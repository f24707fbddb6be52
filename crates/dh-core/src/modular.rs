//! Modular Arithmetic
//!
//! Shared numeric utilities: binary modular exponentiation and
//! factorisation of small integers.

use crate::primality::smallest_factor;

// =============================================================================
// MODULAR EXPONENTIATION
// =============================================================================

/// Compute `base^exponent mod modulus`
///
/// Square-and-multiply over `u128` intermediates so no product overflows.
///
/// # Arguments
/// * `base` - Value to exponentiate
/// * `exponent` - Non-negative exponent
/// * `modulus` - Modulus
///
/// # Returns
/// The residue in [0, modulus). A modulus of 0 or 1 yields 0.
pub fn mod_pow(base: u64, exponent: u64, modulus: u64) -> u64 {
    if modulus <= 1 {
        return 0;
    }

    let m = modulus as u128;
    let mut result: u128 = 1;
    let mut base = base as u128 % m;
    let mut exponent = exponent;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exponent >>= 1;
    }

    result as u64
}

/// Compute `base^exponent mod modulus` for a signed exponent
///
/// A negative exponent raises the inverse of `base`, so `mod_pow_signed(g, -k, p)`
/// is `(g^-1)^k mod p`.
///
/// # Returns
/// `None` when the exponent is negative and `base` has no inverse mod `modulus`
pub fn mod_pow_signed(base: u64, exponent: i64, modulus: u64) -> Option<u64> {
    if exponent >= 0 {
        return Some(mod_pow(base, exponent.unsigned_abs(), modulus));
    }
    let inverse = mod_inverse(base, modulus)?;
    Some(mod_pow(inverse, exponent.unsigned_abs(), modulus))
}

/// Multiplicative inverse of `value` mod `modulus`
///
/// Extended Euclid over `i128`.
///
/// # Returns
/// `None` if `gcd(value, modulus) != 1` or `modulus < 2`
pub fn mod_inverse(value: u64, modulus: u64) -> Option<u64> {
    if modulus < 2 {
        return None;
    }

    let m = modulus as i128;
    let (mut old_r, mut r) = (value as i128 % m, m);
    let (mut old_s, mut s) = (1i128, 0i128);

    while r != 0 {
        let quotient = old_r / r;
        (old_r, r) = (r, old_r - quotient * r);
        (old_s, s) = (s, old_s - quotient * s);
    }

    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(m) as u64)
}

// =============================================================================
// FACTORISATION
// =============================================================================

/// Distinct prime factors of `n` in ascending order
///
/// Trial division; `n` of 0 or 1 has no prime factors.
pub fn distinct_prime_factors(n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut rest = n;

    while rest > 1 {
        let factor = smallest_factor(rest).unwrap_or(rest);
        if factors.last() != Some(&factor) {
            factors.push(factor);
        }
        rest /= factor;
    }

    factors
}
