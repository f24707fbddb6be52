//! # DH Session
//!
//! Two-party Diffie-Hellman session for the demo.
//!
//! A [`Session`] carries everything the exchange needs from one step to the
//! next: the agreed prime, the offered generators, both key pairs and the
//! agreed secret. Nothing is held globally.
//!
//! ## Flow
//!
//! ```text
//! Initial --agree_prime--> PrimeAgreed --choose_generator--> ParamsAgreed
//!         --add_party x2, establish--> Established --send/receive-->
//! ```

pub mod config;
pub mod errors;
pub mod session;

pub use config::*;
pub use errors::*;
pub use session::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::errors::*;
    pub use crate::session::*;
}
