//! Error types for dh-crypto

use dh_core::CoreError;
use thiserror::Error;

/// Errors that can occur in dh-crypto operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Modulus is not prime
    #[error("{0} is not prime")]
    NotPrime(u64),

    /// Value is not a generator of the group mod `prime`
    #[error("{generator} is not a generator mod {prime}")]
    InvalidGenerator { generator: u64, prime: u64 },

    /// Private key outside [1, prime-1] (strict mode)
    #[error("Private key {key} is outside [1, {}]", .prime.saturating_sub(1))]
    InvalidPrivateKey { key: i64, prime: u64 },
}

impl From<CoreError> for CryptoError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NotPrime(n) => CryptoError::NotPrime(n),
        }
    }
}

/// Result type for dh-crypto operations
pub type CryptoResult<T> = Result<T, CryptoError>;
