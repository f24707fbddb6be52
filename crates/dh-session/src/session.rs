//! Session Management
//!
//! Carries one run of the two-party exchange: parameter agreement, key
//! registration, secret agreement and message transfer.

use dh_core::find_generators;
use dh_crypto::prelude::*;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::errors::{SessionError, SessionResult};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing agreed yet
    Initial,
    /// Prime accepted, generators offered
    PrimeAgreed,
    /// Generator chosen, parties may register keys
    ParamsAgreed,
    /// Both parties hold the same secret
    Established,
}

/// One side of the exchange
#[derive(Debug, Clone)]
pub struct Party {
    name: String,
    keys: KeyPair,
}

impl Party {
    /// Get the party name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the key pair
    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    /// Get the public key
    pub fn public_key(&self) -> PublicKey {
        self.keys.public_key()
    }
}

/// A message as the sender puts it on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    /// Code points of the plaintext
    pub codes: Vec<i128>,
    /// Codes after the additive cipher
    pub encrypted: Vec<i128>,
}

/// A message as the receiver recovers it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reception {
    /// Decrypted code points
    pub codes: Vec<i128>,
    /// Decoded text, if every code point is valid
    pub text: Option<String>,
}

/// Two-party Diffie-Hellman session
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    state: SessionState,
    prime: Option<u64>,
    generators: Vec<u64>,
    params: Option<DhParams>,
    parties: Vec<Party>,
    secret: Option<SharedSecret>,
}

impl Session {
    /// Create a new session
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::Initial,
            prime: None,
            generators: Vec::new(),
            params: None,
            parties: Vec::with_capacity(2),
            secret: None,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the agreed prime
    pub fn prime(&self) -> Option<u64> {
        self.prime
    }

    /// Get the generators offered for the agreed prime
    pub fn generators(&self) -> &[u64] {
        &self.generators
    }

    /// Get the agreed group parameters
    pub fn params(&self) -> Option<&DhParams> {
        self.params.as_ref()
    }

    /// Get the registered parties
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// Look up a party by name
    pub fn party(&self, name: &str) -> Option<&Party> {
        self.parties.iter().find(|p| p.name == name)
    }

    /// Get the agreed secret
    pub fn secret(&self) -> Option<SharedSecret> {
        self.secret
    }

    fn expect_state(&self, expected: SessionState) -> SessionResult<()> {
        if self.state != expected {
            return Err(SessionError::InvalidState {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    // =========================================================================
    // PARAMETER AGREEMENT
    // =========================================================================

    /// Agree on the shared prime and compute the generators to offer
    ///
    /// Failures leave the session in `Initial` so the caller can retry. The
    /// bound is checked first, so an oversized value never reaches the
    /// primality test.
    ///
    /// # Returns
    /// Generators of the group mod `prime`, ascending and never empty
    pub fn agree_prime(&mut self, prime: u64) -> SessionResult<&[u64]> {
        self.expect_state(SessionState::Initial)?;

        if prime > self.config.max_prime {
            return Err(SessionError::PrimeTooLarge {
                prime,
                max: self.config.max_prime,
            });
        }
        if !dh_core::is_prime(prime) {
            debug!(prime, "rejected non-prime");
            return Err(CryptoError::NotPrime(prime).into());
        }

        let generators = find_generators(prime).map_err(CryptoError::from)?;
        if generators.is_empty() {
            debug!(prime, "rejected prime without generators");
            return Err(SessionError::NoGenerators(prime));
        }
        info!(prime, generators = generators.len(), "prime agreed");

        self.prime = Some(prime);
        self.generators = generators;
        self.state = SessionState::PrimeAgreed;
        Ok(&self.generators)
    }

    /// Choose one of the offered generators
    pub fn choose_generator(&mut self, generator: u64) -> SessionResult<DhParams> {
        self.expect_state(SessionState::PrimeAgreed)?;
        let prime = self.prime.unwrap_or_default();

        if !self.generators.contains(&generator) {
            return Err(CryptoError::InvalidGenerator { generator, prime }.into());
        }

        let params = DhParams::new(prime, generator)?;
        info!(prime, generator, "generator chosen");

        self.params = Some(params);
        self.state = SessionState::ParamsAgreed;
        Ok(params)
    }

    // =========================================================================
    // KEY REGISTRATION
    // =========================================================================

    /// Register a party with a caller-chosen private key
    ///
    /// In strict mode the key must lie in [1, p-1]. Otherwise any key is
    /// used as given, and a negative key exponentiates the inverse.
    pub fn add_party(&mut self, name: &str, private_key: i64) -> SessionResult<PublicKey> {
        let params = self.registration_params(name)?;
        if self.config.strict_private_keys {
            params.check_private_key(private_key)?;
        }
        Ok(self.register(name, KeyPair::from_secret(params, private_key)))
    }

    /// Register a party with a random private key in [1, p-1]
    pub fn add_random_party<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        rng: &mut R,
    ) -> SessionResult<PublicKey> {
        let params = self.registration_params(name)?;
        Ok(self.register(name, KeyPair::generate(params, rng)))
    }

    fn registration_params(&self, name: &str) -> SessionResult<DhParams> {
        self.expect_state(SessionState::ParamsAgreed)?;
        if self.parties.len() >= 2 {
            return Err(SessionError::PartyLimitReached);
        }
        if self.party(name).is_some() {
            return Err(SessionError::DuplicateParty(name.to_string()));
        }
        self.params.ok_or(SessionError::InvalidState {
            expected: SessionState::ParamsAgreed,
            actual: self.state,
        })
    }

    fn register(&mut self, name: &str, keys: KeyPair) -> PublicKey {
        let public = keys.public_key();
        info!(party = name, public_key = public.value(), "party registered");
        self.parties.push(Party {
            name: name.to_string(),
            keys,
        });
        public
    }

    // =========================================================================
    // SECRET AGREEMENT
    // =========================================================================

    /// Have both parties derive the secret and check that they agree
    pub fn establish(&mut self) -> SessionResult<SharedSecret> {
        self.expect_state(SessionState::ParamsAgreed)?;
        let (first, second) = match self.parties.as_slice() {
            [first, second] => (first, second),
            _ => {
                return Err(SessionError::InvalidState {
                    expected: SessionState::ParamsAgreed,
                    actual: self.state,
                })
            }
        };

        let first_secret = first.keys.diffie_hellman(second.public_key());
        let second_secret = second.keys.diffie_hellman(first.public_key());

        if first_secret != second_secret {
            warn!(
                first = first_secret.value(),
                second = second_secret.value(),
                "shared secrets disagree"
            );
            return Err(SessionError::SecretMismatch {
                first: first_secret.value(),
                second: second_secret.value(),
            });
        }

        info!(secret = first_secret.value(), "shared secret agreed");
        self.secret = Some(first_secret);
        self.state = SessionState::Established;
        Ok(first_secret)
    }

    // =========================================================================
    // MESSAGING
    // =========================================================================

    /// Encode and encrypt a message from `sender`
    ///
    /// The sender keys the cipher with its own derivation of the secret.
    pub fn send(&self, sender: &str, text: &str) -> SessionResult<Transmission> {
        let len = text.chars().count();
        if len > self.config.max_message_len {
            return Err(SessionError::MessageTooLong {
                len,
                max: self.config.max_message_len,
            });
        }

        let cipher = self.cipher_for(sender)?;
        let codes = encode(text);
        let encrypted = cipher.encrypt(&codes);
        debug!(sender, len, "message encrypted");

        Ok(Transmission { codes, encrypted })
    }

    /// Decrypt a message on behalf of `receiver`
    pub fn receive(&self, receiver: &str, encrypted: &[i128]) -> SessionResult<Reception> {
        let cipher = self.cipher_for(receiver)?;
        let codes = cipher.decrypt(encrypted);
        let text = decode(&codes);
        if text.is_none() {
            warn!(receiver, "decrypted codes are not valid text");
        }
        debug!(receiver, len = codes.len(), "message decrypted");

        Ok(Reception { codes, text })
    }

    fn cipher_for(&self, name: &str) -> SessionResult<AdditiveCipher> {
        self.expect_state(SessionState::Established)?;
        let own = self
            .party(name)
            .ok_or_else(|| SessionError::UnknownParty(name.to_string()))?;
        let peer = self
            .parties
            .iter()
            .find(|p| p.name != name)
            .ok_or_else(|| SessionError::UnknownParty(name.to_string()))?;

        let secret = own.keys.diffie_hellman(peer.public_key());
        Ok(AdditiveCipher::new(secret.value(), own.keys.params().prime()))
    }
}
