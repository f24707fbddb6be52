//! # DH Core
//!
//! Number-theoretic foundation for the Diffie-Hellman demo.
//!
//! ## Components
//!
//! - **Primality**: exact trial division
//! - **Generators**: primitive roots of the multiplicative group mod p
//! - **Modular**: modular exponentiation and small-integer factorisation
//!
//! ## Scale
//!
//! Everything here works on `u64` and is meant for demonstration primes.
//! The generator search is O(p²) group operations; callers bound `p`
//! before invoking it.

pub mod errors;
pub mod generators;
pub mod modular;
pub mod primality;

pub use errors::*;
pub use generators::*;
pub use modular::*;
pub use primality::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::generators::*;
    pub use crate::modular::*;
    pub use crate::primality::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_of_validated_prime() {
        let prime = 11;
        assert!(is_prime(prime));

        let generators = find_generators(prime).unwrap();
        assert!(generators.contains(&2));

        // Each generator reaches every non-zero residue
        for g in generators {
            let mut seen: Vec<u64> = (1..prime).map(|k| mod_pow(g, k, prime)).collect();
            seen.sort_unstable();
            assert_eq!(seen, (1..prime).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_composite_has_no_generators() {
        assert!(!is_prime(12));
        assert_eq!(find_generators(12), Err(CoreError::NotPrime(12)));
    }
}
