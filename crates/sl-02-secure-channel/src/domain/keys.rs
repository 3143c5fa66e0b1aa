//! # Channel Keys
//!
//! The channel holds two independent 256-bit keys: one for AES-256-CBC and
//! one for HMAC-SHA256. They are either provisioned directly or derived
//! from a handshake session key with HKDF-SHA256.

use crate::domain::errors::ChannelError;
use shared_crypto::symmetric::KEY_SIZE;
use shared_crypto::{hkdf_sha256, SecretKey};
use shared_types::SessionKey;
use std::fmt;
use zeroize::Zeroize;

const ENC_KEY_INFO: &[u8] = b"securelink/channel/enc/v1";
const AUTH_KEY_INFO: &[u8] = b"securelink/channel/auth/v1";

/// Encryption and authentication keys shared by both ends of a channel.
#[derive(Clone)]
pub struct ChannelKeys {
    enc_key: SecretKey,
    auth_key: SecretKey,
}

impl ChannelKeys {
    /// Use provisioned keys.
    pub fn new(enc_key: [u8; KEY_SIZE], auth_key: [u8; KEY_SIZE]) -> Self {
        Self {
            enc_key: SecretKey::from_bytes(enc_key),
            auth_key: SecretKey::from_bytes(auth_key),
        }
    }

    /// Use provisioned keys given as slices.
    pub fn from_slices(enc_key: &[u8], auth_key: &[u8]) -> Result<Self, ChannelError> {
        Ok(Self {
            enc_key: SecretKey::from_slice(enc_key)?,
            auth_key: SecretKey::from_slice(auth_key)?,
        })
    }

    /// Derive both keys from a handshake session key.
    pub fn derive(session_key: &SessionKey) -> Result<Self, ChannelError> {
        let mut enc = [0u8; KEY_SIZE];
        let mut auth = [0u8; KEY_SIZE];
        hkdf_sha256(session_key.as_bytes(), None, ENC_KEY_INFO, &mut enc)?;
        hkdf_sha256(session_key.as_bytes(), None, AUTH_KEY_INFO, &mut auth)?;

        let keys = Self::new(enc, auth);
        enc.zeroize();
        auth.zeroize();
        Ok(keys)
    }

    pub(crate) fn enc_key(&self) -> &SecretKey {
        &self.enc_key
    }

    pub(crate) fn auth_key(&self) -> &[u8] {
        self.auth_key.as_bytes()
    }
}

impl fmt::Debug for ChannelKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChannelKeys(<redacted>)")
    }
}
