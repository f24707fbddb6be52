//! Error types for dh-core

use thiserror::Error;

/// Errors that can occur in dh-core operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// The value handed to a prime-only operation is not prime
    #[error("{0} is not prime")]
    NotPrime(u64),
}

/// Result type for dh-core operations
pub type CoreResult<T> = Result<T, CoreError>;
