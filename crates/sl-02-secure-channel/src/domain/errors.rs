//! # Channel Errors

use shared_crypto::CryptoError;
use shared_types::FrameError;
use thiserror::Error;

/// Errors that can occur while sending or receiving a channel message.
///
/// Every check a received message can fail (padding, length, MAC,
/// freshness) is reported as the single `VerificationFailed` variant.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Stream failed, closed early, or returned a short read
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Announced frame exceeds the configured ceiling
    #[error("Frame too large: {len} bytes exceeds limit of {max}")]
    FrameTooLarge {
        /// Announced length
        len: usize,
        /// Configured ceiling
        max: usize,
    },

    /// Announced frame is empty
    #[error("Empty frame")]
    EmptyFrame,

    /// Local cryptographic failure while sending
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Received message failed authentication or freshness
    #[error("Message verification failed")]
    VerificationFailed,

    /// Configuration rejected by `validate()`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<FrameError> for ChannelError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Io(e) => Self::Transport(e),
            FrameError::TooLarge { len, max } => Self::FrameTooLarge { len, max },
            FrameError::Empty => Self::EmptyFrame,
        }
    }
}

impl ChannelError {
    /// Short label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::FrameTooLarge { .. } => "frame_too_large",
            Self::EmptyFrame => "empty_frame",
            Self::Crypto(_) => "crypto",
            Self::VerificationFailed => "verification_failed",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}
