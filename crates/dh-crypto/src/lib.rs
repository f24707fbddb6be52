//! # DH Crypto
//!
//! Key derivation and message obfuscation for the Diffie-Hellman demo.
//!
//! ## Components
//!
//! - **Key Exchange**: public keys and shared secrets by modular
//!   exponentiation over a prime field
//! - **Codec**: code-point encoding and the constant-offset additive cipher
//!
//! ## Security
//!
//! None. The group is tiny, and the cipher adds the same offset to every
//! code point, so one known character reveals the key. This crate exists to
//! show the arithmetic of the exchange.

pub mod codec;
pub mod errors;
pub mod key_exchange;

pub use codec::*;
pub use errors::*;
pub use key_exchange::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::codec::*;
    pub use crate::errors::*;
    pub use crate::key_exchange::*;
}
