//! # SHA-256 Hashing, HMAC and HKDF
//!
//! Message authentication for the secure channel and key derivation from
//! the handshake's session key.

use crate::CryptoError;
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 output (256-bit).
pub type Hash = [u8; 32];

/// HMAC-SHA256 tag length in bytes.
pub const MAC_SIZE: usize = 32;

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// HMAC-SHA256 over the concatenation of `parts`.
///
/// Feeding the parts one by one avoids building the concatenated buffer.
pub fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> Result<[u8; MAC_SIZE], CryptoError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| CryptoError::InvalidInput(format!("HMAC key: {e}")))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().into())
}

/// Check an HMAC-SHA256 tag in constant time.
pub fn verify_hmac_sha256(key: &[u8], parts: &[&[u8]], tag: &[u8]) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    for part in parts {
        mac.update(part);
    }
    mac.verify_slice(tag).is_ok()
}

/// HKDF-SHA256 expand of `ikm` into `out.len()` bytes under `info`.
///
/// # Errors
///
/// Returns `CryptoError::InvalidInput` if more than 255 * 32 bytes are
/// requested.
pub fn hkdf_sha256(
    ikm: &[u8],
    salt: Option<&[u8]>,
    info: &[u8],
    out: &mut [u8],
) -> Result<(), CryptoError> {
    Hkdf::<Sha256>::new(salt, ikm)
        .expand(info, out)
        .map_err(|_| CryptoError::InvalidInput(format!("HKDF output too long: {}", out.len())))
}
