//! Finite-Field Key Exchange
//!
//! Diffie-Hellman over the multiplicative group mod a small prime.
//! A public key is `g^a mod p`; the shared secret is the peer's public key
//! raised to the own private key, which both parties reach because
//! `(g^a)^b = (g^b)^a mod p`.

use std::fmt;

use dh_core::{has_distinct_powers, is_prime, mod_pow_signed};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{CryptoError, CryptoResult};

// =============================================================================
// RAW DERIVATION
// =============================================================================

/// Compute `generator^private_key mod prime`
///
/// No validation; any combination of inputs produces a residue. A negative
/// private key raises the inverse of `generator`. When that inverse does
/// not exist (generator divisible by prime) the result is 0.
pub fn public_key(generator: u64, private_key: i64, prime: u64) -> u64 {
    mod_pow_signed(generator, private_key, prime).unwrap_or(0)
}

/// Compute `peer_public_key^own_private_key mod prime`
///
/// Same operation as [`public_key`] with the roles renamed.
pub fn shared_secret(peer_public_key: u64, own_private_key: i64, prime: u64) -> u64 {
    public_key(peer_public_key, own_private_key, prime)
}

// =============================================================================
// GROUP PARAMETERS
// =============================================================================

/// Shared (prime, generator) pair both parties agree on
///
/// Only constructed through [`DhParams::new`], so a value always holds a
/// prime and one of its generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DhParams {
    prime: u64,
    generator: u64,
}

impl DhParams {
    /// Validate and create group parameters
    ///
    /// # Arguments
    /// * `prime` - Modulus; must be prime
    /// * `generator` - Must be in [2, prime-1] with distinct powers
    ///
    /// # Returns
    /// Parameters, or `NotPrime` / `InvalidGenerator`
    pub fn new(prime: u64, generator: u64) -> CryptoResult<Self> {
        if !is_prime(prime) {
            return Err(CryptoError::NotPrime(prime));
        }
        if !(2..prime).contains(&generator) || !has_distinct_powers(generator, prime) {
            return Err(CryptoError::InvalidGenerator { generator, prime });
        }
        Ok(Self { prime, generator })
    }

    /// Get the prime modulus
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Get the generator
    pub fn generator(&self) -> u64 {
        self.generator
    }

    /// Reject private keys outside [1, prime-1]
    pub fn check_private_key(&self, key: i64) -> CryptoResult<()> {
        if u64::try_from(key).is_ok_and(|k| (1..self.prime).contains(&k)) {
            Ok(())
        } else {
            Err(CryptoError::InvalidPrivateKey {
                key,
                prime: self.prime,
            })
        }
    }
}

// =============================================================================
// KEYS
// =============================================================================

/// Public half of a key pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(u64);

impl PublicKey {
    /// Wrap a raw public value
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value both parties derive independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedSecret(u64);

impl SharedSecret {
    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Private exponent paired with its public key
#[derive(Clone)]
pub struct KeyPair {
    params: DhParams,
    secret: i64,
    public: PublicKey,
}

impl KeyPair {
    /// Create from a caller-chosen private key
    ///
    /// The key is passed through unvalidated, zero and negative values
    /// included; see [`DhParams::check_private_key`] for the strict check.
    pub fn from_secret(params: DhParams, secret: i64) -> Self {
        let public = PublicKey(public_key(params.generator, secret, params.prime));
        Self {
            params,
            secret,
            public,
        }
    }

    /// Generate a key pair with a private key drawn uniformly from [1, p-1]
    pub fn generate<R: Rng + ?Sized>(params: DhParams, rng: &mut R) -> Self {
        let upper = i64::try_from(params.prime).unwrap_or(i64::MAX);
        let secret = rng.gen_range(1..upper);
        Self::from_secret(params, secret)
    }

    /// Get the group parameters
    pub fn params(&self) -> &DhParams {
        &self.params
    }

    /// Get the public key
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// Get the private key (be careful with this!)
    pub fn secret_key(&self) -> i64 {
        self.secret
    }

    /// Combine the peer's public key with our private key
    pub fn diffie_hellman(&self, their_public: PublicKey) -> SharedSecret {
        SharedSecret(shared_secret(
            their_public.0,
            self.secret,
            self.params.prime,
        ))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("params", &self.params)
            .field("public", &self.public.0)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dh_core::find_generators;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_worked_example() {
        assert!(find_generators(11).unwrap().contains(&2));

        let public_a = public_key(2, 3, 11);
        let public_b = public_key(2, 4, 11);
        assert_eq!(public_a, 8);
        assert_eq!(public_b, 5);

        assert_eq!(shared_secret(public_b, 3, 11), 4);
        assert_eq!(shared_secret(public_a, 4, 11), 4);
    }

    #[test]
    fn test_agreement_for_all_small_keys() {
        for p in [5u64, 7, 11, 13] {
            for g in find_generators(p).unwrap() {
                for a in 1..p as i64 {
                    for b in 1..p as i64 {
                        assert_eq!(
                            shared_secret(public_key(g, b, p), a, p),
                            shared_secret(public_key(g, a, p), b, p),
                            "p={} g={} a={} b={}",
                            p,
                            g,
                            a,
                            b
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_params_validation() {
        assert!(DhParams::new(11, 2).is_ok());
        assert_eq!(DhParams::new(12, 5), Err(CryptoError::NotPrime(12)));
        assert_eq!(
            DhParams::new(11, 3),
            Err(CryptoError::InvalidGenerator {
                generator: 3,
                prime: 11
            })
        );
        assert!(DhParams::new(11, 11).is_err());
        assert!(DhParams::new(11, 1).is_err());
    }

    #[test]
    fn test_private_key_check() {
        let params = DhParams::new(11, 2).unwrap();
        assert!(params.check_private_key(1).is_ok());
        assert!(params.check_private_key(10).is_ok());
        assert!(params.check_private_key(0).is_err());
        assert!(params.check_private_key(11).is_err());
        assert!(params.check_private_key(-3).is_err());
    }

    #[test]
    fn test_negative_keys_use_inverse() {
        // 2^-3 = 8^-1 = 7 mod 11
        assert_eq!(public_key(2, -3, 11), 7);
        assert_eq!(public_key(2, -1, 11), 6);
        // No inverse of 0
        assert_eq!(public_key(0, -1, 11), 0);

        for p in [5u64, 7, 11, 13] {
            for g in find_generators(p).unwrap() {
                for a in -(p as i64)..p as i64 {
                    for b in [-7i64, -1, 0, 2, 9] {
                        assert_eq!(
                            shared_secret(public_key(g, b, p), a, p),
                            shared_secret(public_key(g, a, p), b, p),
                            "p={} g={} a={} b={}",
                            p,
                            g,
                            a,
                            b
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_negative_keypair_agrees() {
        let params = DhParams::new(11, 2).unwrap();
        let alice = KeyPair::from_secret(params, -3);
        let bob = KeyPair::from_secret(params, 4);

        assert_eq!(alice.secret_key(), -3);
        assert_eq!(alice.public_key().value(), 7);
        assert_eq!(
            alice.diffie_hellman(bob.public_key()),
            bob.diffie_hellman(alice.public_key())
        );
    }

    #[test]
    fn test_unvalidated_keys_pass_through() {
        let params = DhParams::new(11, 2).unwrap();
        // g^0 = 1
        assert_eq!(KeyPair::from_secret(params, 0).public_key().value(), 1);
        // Exponents wrap with the group order
        assert_eq!(
            KeyPair::from_secret(params, 13).public_key(),
            KeyPair::from_secret(params, 3).public_key()
        );
    }

    #[test]
    fn test_keypair_diffie_hellman() {
        let params = DhParams::new(23, 5).unwrap();
        let alice = KeyPair::from_secret(params, 6);
        let bob = KeyPair::from_secret(params, 15);

        assert_eq!(alice.public_key().value(), 8);
        assert_eq!(bob.public_key().value(), 19);

        let alice_shared = alice.diffie_hellman(bob.public_key());
        let bob_shared = bob.diffie_hellman(alice.public_key());
        assert_eq!(alice_shared, bob_shared);
        assert_eq!(alice_shared.value(), 2);
    }

    #[test]
    fn test_generated_keys_in_range() {
        let params = DhParams::new(13, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let kp = KeyPair::generate(params, &mut rng);
            assert!(params.check_private_key(kp.secret_key()).is_ok());
        }
    }

    #[test]
    fn test_generated_keys_agree() {
        let params = DhParams::new(101, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let alice = KeyPair::generate(params, &mut rng);
        let bob = KeyPair::generate(params, &mut rng);

        assert_eq!(
            alice.diffie_hellman(bob.public_key()),
            bob.diffie_hellman(alice.public_key())
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let params = DhParams::new(11, 2).unwrap();
        let kp = KeyPair::from_secret(params, 7);
        let debug = format!("{:?}", kp);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret: 7"));
    }

    #[test]
    fn test_serializable_public_key() {
        let params = DhParams::new(11, 2).unwrap();
        let kp = KeyPair::from_secret(params, 3);

        let json = serde_json::to_string(&kp.public_key()).unwrap();
        assert_eq!(json, "8");

        let deserialized: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, kp.public_key());
    }

    #[test]
    fn test_params_serialization() {
        let params = DhParams::new(13, 6).unwrap();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"prime":13,"generator":6}"#);
    }
}
