//! # RSA Signatures
//!
//! RSASSA-PKCS#1 v1.5 with SHA-256 (`SHA256withRSA`).
//!
//! ## Security Properties
//!
//! - Deterministic: signing the same message twice yields the same bytes
//! - Signature length equals the signer's modulus length

use crate::keys::{RsaKeyPair, RsaPublicKey};
use crate::CryptoError;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use sha2::Sha256;

/// Raw PKCS#1 v1.5 signature bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaSignature(Vec<u8>);

impl RsaSignature {
    /// Wrap raw signature bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl RsaKeyPair {
    /// Sign `message` with SHA256withRSA.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::SigningFailed` if the key cannot produce a
    /// signature (e.g. modulus too small for the digest encoding).
    pub fn sign(&self, message: &[u8]) -> Result<RsaSignature, CryptoError> {
        let signing_key = SigningKey::<Sha256>::new(self.inner().clone());
        let signature = signing_key
            .try_sign(message)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        Ok(RsaSignature(signature.to_vec()))
    }
}

impl RsaPublicKey {
    /// Verify a SHA256withRSA signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &RsaSignature) -> Result<(), CryptoError> {
        let verifying_key = VerifyingKey::<Sha256>::new(self.inner().clone());
        let signature =
            Signature::try_from(signature.as_bytes()).map_err(|_| CryptoError::InvalidSignatureFormat)?;

        verifying_key
            .verify(message, &signature)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}
