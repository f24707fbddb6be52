//! Generator Discovery
//!
//! Enumerates the generators (primitive roots) of the multiplicative group
//! mod p.
//!
//! Two searches live here:
//!
//! - [`find_generators`]: the reference scan. A candidate `g` in [2, p-1] is
//!   a generator iff `g^j mod p` for `j` in [2, p-1] are pairwise distinct.
//!   O(p²) modular exponentiations.
//! - [`primitive_roots`]: order test. `g` is a primitive root iff
//!   `g^((p-1)/q) != 1 mod p` for every prime `q` dividing `p-1`.
//!
//! Over the candidate range [2, p-1] the two agree for every prime: a run of
//! p-2 consecutive powers is repetition-free iff ord(g) >= p-2, and the only
//! divisor of p-1 that large is p-1 itself (for p = 3 both searches yield
//! `[2]`).

use std::collections::HashSet;

use tracing::debug;

use crate::errors::{CoreError, CoreResult};
use crate::modular::{distinct_prime_factors, mod_pow};
use crate::primality::is_prime;

// =============================================================================
// REFERENCE SCAN
// =============================================================================

/// Find every generator of the multiplicative group mod `prime`
///
/// # Arguments
/// * `prime` - Modulus, re-checked for primality
///
/// # Returns
/// Generators in ascending order, or `CoreError::NotPrime`.
/// For `prime == 2` the candidate range is empty and so is the result.
pub fn find_generators(prime: u64) -> CoreResult<Vec<u64>> {
    if !is_prime(prime) {
        return Err(CoreError::NotPrime(prime));
    }

    let generators: Vec<u64> = (2..prime)
        .filter(|&candidate| has_distinct_powers(candidate, prime))
        .collect();

    debug!(
        prime,
        candidates = prime.saturating_sub(2),
        found = generators.len(),
        "generator scan complete"
    );

    Ok(generators)
}

/// Check the reference generator property for a single candidate
///
/// `prime` is not re-validated here.
pub fn has_distinct_powers(candidate: u64, prime: u64) -> bool {
    let mut seen = HashSet::new();
    (2..prime).all(|exponent| seen.insert(mod_pow(candidate, exponent, prime)))
}

// =============================================================================
// ORDER TEST
// =============================================================================

/// Find every primitive root in [2, prime-1] using the group-order test
///
/// Yields the same list as [`find_generators`] at a cost of
/// O(p · ω(p-1) · log p).
pub fn primitive_roots(prime: u64) -> CoreResult<Vec<u64>> {
    if !is_prime(prime) {
        return Err(CoreError::NotPrime(prime));
    }

    let order = prime - 1;
    let factors = distinct_prime_factors(order);

    Ok((2..prime)
        .filter(|&candidate| has_full_order(candidate, prime, order, &factors))
        .collect())
}

/// Check whether `candidate` generates the whole group mod `prime`
pub fn is_primitive_root(candidate: u64, prime: u64) -> bool {
    if !is_prime(prime) || candidate % prime == 0 {
        return false;
    }
    let order = prime - 1;
    has_full_order(candidate, prime, order, &distinct_prime_factors(order))
}

fn has_full_order(candidate: u64, prime: u64, order: u64, factors: &[u64]) -> bool {
    factors
        .iter()
        .all(|&q| mod_pow(candidate, order / q, prime) != 1)
}
