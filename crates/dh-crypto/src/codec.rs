//! Message Codec
//!
//! Text travels as one integer per character (its Unicode scalar value).
//! The cipher adds `secret mod prime` to every element and subtracts it to
//! decrypt. Results are not reduced, so ciphertext values may exceed both
//! the prime and the code-point range.
//!
//! Values are `i128`: a code point plus any `u64` offset is exact, and so is
//! a decrypted value that drops below zero.

/// Encode text as one code point per character, in order
pub fn encode(text: &str) -> Vec<i128> {
    text.chars().map(|c| c as i128).collect()
}

/// Decode code points back to text
///
/// # Returns
/// `None` if any value is not a Unicode scalar value
pub fn decode(codes: &[i128]) -> Option<String> {
    codes
        .iter()
        .map(|&code| u32::try_from(code).ok().and_then(char::from_u32))
        .collect()
}

/// Add `secret mod prime` to every element
pub fn encrypt(secret: u64, codes: &[i128], prime: u64) -> Vec<i128> {
    AdditiveCipher::new(secret, prime).encrypt(codes)
}

/// Subtract `secret mod prime` from every element
pub fn decrypt(secret: u64, encrypted: &[i128], prime: u64) -> Vec<i128> {
    AdditiveCipher::new(secret, prime).decrypt(encrypted)
}

/// Constant-offset additive cipher keyed by a shared secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditiveCipher {
    offset: u64,
}

impl AdditiveCipher {
    /// Create a cipher with offset `secret mod prime`
    ///
    /// A prime of 0 leaves the secret unreduced.
    pub fn new(secret: u64, prime: u64) -> Self {
        Self {
            offset: secret.checked_rem(prime).unwrap_or(secret),
        }
    }

    /// Get the offset added to each element
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Encrypt a code sequence
    ///
    /// Values within `u64::MAX` of `i128::MAX` wrap, and
    /// [`decrypt`](Self::decrypt) wraps them back.
    pub fn encrypt(&self, codes: &[i128]) -> Vec<i128> {
        let offset = i128::from(self.offset);
        codes.iter().map(|c| c.wrapping_add(offset)).collect()
    }

    /// Decrypt a code sequence
    pub fn decrypt(&self, encrypted: &[i128]) -> Vec<i128> {
        let offset = i128::from(self.offset);
        encrypted.iter().map(|c| c.wrapping_sub(offset)).collect()
    }
}
