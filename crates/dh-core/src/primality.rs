//! Primality Checking
//!
//! Trial division by every integer in [2, ⌊√n⌋] using exact integer
//! remainders.

/// Check whether `n` is prime
///
/// Values below 2 are not prime.
///
/// # Arguments
/// * `n` - Candidate value
///
/// # Returns
/// `true` if no integer in [2, ⌊√n⌋] divides `n`
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    smallest_factor(n).is_none()
}

/// Smallest divisor of `n` in [2, ⌊√n⌋], if any
///
/// `i <= n / i` keeps the bound check free of overflow for `n` close to
/// `u64::MAX`.
pub fn smallest_factor(n: u64) -> Option<u64> {
    let mut i = 2u64;
    while i <= n / i {
        if n % i == 0 {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Iterator over every prime up to and including `limit`
pub fn primes_up_to(limit: u64) -> impl Iterator<Item = u64> {
    (2..=limit).filter(|&n| is_prime(n))
}
