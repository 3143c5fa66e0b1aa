//! # RSA Sealing
//!
//! Small secrets (session keys, challenge nonces) are sealed for a single
//! recipient with RSAES-OAEP using SHA-256 for both the hash and MGF1.
//!
//! A 2048-bit key seals at most 190 bytes; a 1024-bit key at most 62.

use crate::keys::{RsaKeyPair, RsaPublicKey};
use crate::CryptoError;
use rand::rngs::OsRng;
use rsa::Oaep;
use sha2::Sha256;

/// OAEP overhead for SHA-256: two digests plus two bytes.
const OAEP_SHA256_OVERHEAD: usize = 2 * 32 + 2;

impl RsaPublicKey {
    /// Seal `plaintext` so only the holder of the matching private key can
    /// recover it.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EncryptionFailed` if the plaintext is too long
    /// for the modulus.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.inner()
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
    }

    /// Largest plaintext `seal` accepts for this key.
    pub fn max_seal_len(&self) -> usize {
        (self.bits() / 8).saturating_sub(OAEP_SHA256_OVERHEAD)
    }
}

impl RsaKeyPair {
    /// Recover a value sealed under this pair's public key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::DecryptionFailed` for a wrong key or a corrupted
    /// ciphertext. OAEP decoding never yields plaintext in those cases.
    pub fn unseal(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.inner()
            .decrypt(Oaep::new::<Sha256>(), ciphertext)
            .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
    }
}
