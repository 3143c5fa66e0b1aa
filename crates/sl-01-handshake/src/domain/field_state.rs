//! # Field State
//!
//! The session key and challenge travel in one of two states: plaintext
//! while the issuer signs (and after the recipient unseals), sealed under
//! the recipient's public key while on the wire.

use std::fmt;
use zeroize::Zeroize;

/// Content of a sealable handshake field. Plaintext bytes are wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub enum FieldState {
    /// Readable value, covered by the signature.
    Plaintext(Vec<u8>),
    /// RSA-OAEP ciphertext for the recipient.
    Sealed(Vec<u8>),
}

impl FieldState {
    /// Plaintext bytes, or `None` while sealed.
    pub fn as_plaintext(&self) -> Option<&[u8]> {
        match self {
            Self::Plaintext(bytes) => Some(bytes),
            Self::Sealed(_) => None,
        }
    }

    /// Ciphertext bytes, or `None` while plaintext.
    pub fn as_sealed(&self) -> Option<&[u8]> {
        match self {
            Self::Plaintext(_) => None,
            Self::Sealed(bytes) => Some(bytes),
        }
    }

    /// Whether the field is sealed.
    pub fn is_sealed(&self) -> bool {
        matches!(self, Self::Sealed(_))
    }

    /// State name for diagnostics.
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Plaintext(_) => "plaintext",
            Self::Sealed(_) => "sealed",
        }
    }
}

impl Drop for FieldState {
    fn drop(&mut self) {
        if let Self::Plaintext(bytes) = self {
            bytes.zeroize();
        }
    }
}

impl fmt::Debug for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plaintext(bytes) => write!(f, "Plaintext(<{} bytes>)", bytes.len()),
            Self::Sealed(bytes) => write!(f, "Sealed(<{} bytes>)", bytes.len()),
        }
    }
}
