//! Session Errors
//!
//! Error types for the two-party session.

use dh_crypto::CryptoError;
use thiserror::Error;

use crate::session::SessionState;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Prime has no generator to offer
    #[error("{0} has no generators to choose from")]
    NoGenerators(u64),

    /// Prime exceeds the configured search bound
    #[error("Prime {prime} exceeds the configured maximum of {max}")]
    PrimeTooLarge { prime: u64, max: u64 },

    /// Operation not allowed in the current state
    #[error("Invalid session state: expected {expected:?}, got {actual:?}")]
    InvalidState {
        expected: SessionState,
        actual: SessionState,
    },

    /// No party with this name
    #[error("Unknown party: {0}")]
    UnknownParty(String),

    /// Party name already registered
    #[error("Party already registered: {0}")]
    DuplicateParty(String),

    /// Both parties are already registered
    #[error("Session already has two parties")]
    PartyLimitReached,

    /// The two derived secrets differ
    #[error("Shared secrets disagree: {first} != {second}")]
    SecretMismatch { first: u64, second: u64 },

    /// Message exceeds the configured length
    #[error("Message of {len} characters exceeds the maximum of {max}")]
    MessageTooLong { len: usize, max: usize },

    /// Key exchange error
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl SessionError {
    /// Whether re-prompting the same step can fix the error
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SessionError::PrimeTooLarge { .. }
                | SessionError::NoGenerators(_)
                | SessionError::DuplicateParty(_)
                | SessionError::MessageTooLong { .. }
                | SessionError::Crypto(_)
        )
    }
}
