//! # Handshake Configuration

use crate::domain::errors::HandshakeError;
use serde::{Deserialize, Serialize};
use std::env;

/// Session keys shorter than this are rejected by `validate()`.
pub const MIN_SESSION_KEY_LEN: usize = 16;

/// Largest session key `validate()` allows: what OAEP-SHA256 can seal under
/// a 2048-bit recipient key. Smaller recipient keys are checked by `initiate`.
pub const MAX_SESSION_KEY_LEN: usize = 190;

/// Handshake service configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeConfig {
    /// Require the claimed issuer to equal the certificate subject CN.
    pub require_issuer_binding: bool,

    /// Largest handshake frame accepted from a stream, in bytes.
    pub max_message_len: usize,

    /// How long an accepted `(issuer, challenge)` pair blocks a repeat.
    pub replay_window_secs: u64,

    /// Length of the random session key drawn by `initiate`.
    pub session_key_len: usize,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            require_issuer_binding: true,
            max_message_len: 64 * 1024,
            replay_window_secs: 120,
            session_key_len: 32,
        }
    }
}

impl HandshakeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SL_HANDSHAKE_REQUIRE_BINDING`: Issuer/subject check (default: true)
    /// - `SL_HANDSHAKE_MAX_LEN`: Frame ceiling in bytes (default: 65536)
    /// - `SL_HANDSHAKE_REPLAY_SECS`: Replay window (default: 120)
    /// - `SL_HANDSHAKE_KEY_LEN`: Session key length (default: 32)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            require_issuer_binding: env::var("SL_HANDSHAKE_REQUIRE_BINDING")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.require_issuer_binding),

            max_message_len: env::var("SL_HANDSHAKE_MAX_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_message_len),

            replay_window_secs: env::var("SL_HANDSHAKE_REPLAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.replay_window_secs),

            session_key_len: env::var("SL_HANDSHAKE_KEY_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.session_key_len),
        }
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), HandshakeError> {
        if self.max_message_len == 0 {
            return Err(HandshakeError::InvalidConfig(
                "max_message_len must be positive".into(),
            ));
        }
        if self.replay_window_secs == 0 {
            return Err(HandshakeError::InvalidConfig(
                "replay_window_secs must be positive".into(),
            ));
        }
        if self.session_key_len < MIN_SESSION_KEY_LEN {
            return Err(HandshakeError::InvalidConfig(format!(
                "session_key_len must be at least {MIN_SESSION_KEY_LEN}"
            )));
        }
        if self.session_key_len > MAX_SESSION_KEY_LEN {
            return Err(HandshakeError::InvalidConfig(format!(
                "session_key_len must be at most {MAX_SESSION_KEY_LEN}"
            )));
        }
        Ok(())
    }
}
