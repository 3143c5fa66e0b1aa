//! # Channel Configuration

use crate::domain::errors::ChannelError;
use serde::{Deserialize, Serialize};
use shared_crypto::symmetric::{BLOCK_SIZE, IV_SIZE};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Smallest frame a valid envelope can produce: IV plus three blocks
/// (timestamp and MAC alone need 40 bytes, padded to 48).
pub const MIN_FRAME_LEN: usize = IV_SIZE + 3 * BLOCK_SIZE;

/// What the receiver's pre-read challenge is used for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeMode {
    /// Sender reads the challenge and binds it into the MAC.
    #[default]
    Echo,
    /// Sender ignores the challenge. Provides no replay protection; the
    /// unread 4 bytes also stay in the stream, so use only one direction.
    Advisory,
}

impl fmt::Display for ChallengeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Echo => f.write_str("echo"),
            Self::Advisory => f.write_str("advisory"),
        }
    }
}

impl FromStr for ChallengeMode {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "echo" => Ok(Self::Echo),
            "advisory" => Ok(Self::Advisory),
            other => Err(ChannelError::InvalidConfig(format!(
                "unknown challenge mode '{other}'"
            ))),
        }
    }
}

/// Secure channel configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Largest accepted difference between a message timestamp and the
    /// receiver's clock, in milliseconds.
    pub freshness_window_ms: u64,

    /// Largest ciphertext frame accepted, in bytes.
    pub max_frame_len: usize,

    /// Use of the receiver's challenge.
    pub challenge_mode: ChallengeMode,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            freshness_window_ms: 1000,
            max_frame_len: 16 * 1024 * 1024,
            challenge_mode: ChallengeMode::Echo,
        }
    }
}

impl ChannelConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SL_CHANNEL_FRESHNESS_MS`: Freshness window (default: 1000)
    /// - `SL_CHANNEL_MAX_FRAME`: Frame ceiling in bytes (default: 16 MiB)
    /// - `SL_CHANNEL_CHALLENGE`: `echo` or `advisory` (default: echo)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            freshness_window_ms: env::var("SL_CHANNEL_FRESHNESS_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.freshness_window_ms),

            max_frame_len: env::var("SL_CHANNEL_MAX_FRAME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_frame_len),

            challenge_mode: env::var("SL_CHANNEL_CHALLENGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.challenge_mode),
        }
    }

    /// Reject values the channel cannot run with.
    pub fn validate(&self) -> Result<(), ChannelError> {
        if self.freshness_window_ms == 0 {
            return Err(ChannelError::InvalidConfig(
                "freshness_window_ms must be positive".into(),
            ));
        }
        if self.max_frame_len < MIN_FRAME_LEN {
            return Err(ChannelError::InvalidConfig(format!(
                "max_frame_len must be at least {MIN_FRAME_LEN}"
            )));
        }
        if u32::try_from(self.max_frame_len).is_err() {
            return Err(ChannelError::InvalidConfig(
                "max_frame_len must fit a 4-byte length prefix".into(),
            ));
        }
        Ok(())
    }
}
