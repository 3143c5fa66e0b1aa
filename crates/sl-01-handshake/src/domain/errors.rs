//! # Handshake Errors
//!
//! Error types for building, transmitting and verifying handshake messages.

use shared_crypto::CryptoError;
use shared_types::{FrameError, FramingError};
use thiserror::Error;

/// Errors that can occur during a handshake.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandshakeError {
    /// Wire bytes are not exactly six length-prefixed fields
    #[error("Framing error: {0}")]
    Framing(#[from] FramingError),

    /// An identity field is not valid UTF-8
    #[error("Malformed {field} identity")]
    MalformedIdentity {
        /// Which identity field failed to decode
        field: &'static str,
    },

    /// Unsealed challenge is not exactly 4 bytes
    #[error("Malformed challenge: expected 4 bytes, got {0}")]
    MalformedChallenge(usize),

    /// Embedded certificate could not be parsed or used
    #[error("Certificate error: {0}")]
    Certificate(String),

    /// Certificate is not vouched for by a trusted authority
    #[error("Untrusted certificate: {0}")]
    UntrustedCertificate(String),

    /// Sealed field could not be recovered with the local private key
    #[error("Unseal failed: {0}")]
    Unseal(String),

    /// Field could not be sealed for the recipient
    #[error("Sealing failed: {0}")]
    Sealing(String),

    /// Issuer key failed to produce a signature
    #[error("Signing failed: {0}")]
    Signing(String),

    /// `sign` was called before a challenge was assigned
    #[error("Challenge nonce not assigned")]
    ChallengeNotAssigned,

    /// Message carries no signature
    #[error("Message is not signed")]
    MissingSignature,

    /// Operation is not valid in the field's current state
    #[error("Invalid state: {field} is {state}")]
    InvalidFieldState {
        /// Field name
        field: &'static str,
        /// Current state of the field
        state: &'static str,
    },

    /// Signature does not verify under the certificate key
    #[error("Signature invalid")]
    SignatureInvalid,

    /// Claimed issuer is not the certificate subject
    #[error("Issuer '{issuer}' does not match certificate subject {subject:?}")]
    IssuerSubjectMismatch {
        /// Claimed issuer identity
        issuer: String,
        /// Certificate subject common name, if present
        subject: Option<String>,
    },

    /// Message is addressed to someone else
    #[error("Recipient mismatch: expected '{expected}', got '{actual}'")]
    RecipientMismatch {
        /// Local identity
        expected: String,
        /// Recipient named in the message
        actual: String,
    },

    /// `(issuer, challenge)` was already accepted inside the replay window
    #[error("Replayed challenge {challenge:#010x} from '{issuer}'")]
    ReplayedChallenge {
        /// Claimed issuer
        issuer: String,
        /// Repeated challenge value
        challenge: u32,
    },

    /// Stream failure while moving a handshake frame
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration rejected by `validate()`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HandshakeError {
    /// True for failures to decode the received bytes, as opposed to
    /// failures of trust or cryptography.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::Framing(_)
                | Self::MalformedIdentity { .. }
                | Self::MalformedChallenge(_)
                | Self::Certificate(_)
        )
    }

    /// Short label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Framing(_) => "framing",
            Self::MalformedIdentity { .. } => "malformed_identity",
            Self::MalformedChallenge(_) => "malformed_challenge",
            Self::Certificate(_) => "certificate",
            Self::UntrustedCertificate(_) => "untrusted_certificate",
            Self::Unseal(_) => "unseal",
            Self::Sealing(_) => "sealing",
            Self::Signing(_) => "signing",
            Self::ChallengeNotAssigned => "challenge_not_assigned",
            Self::MissingSignature => "missing_signature",
            Self::InvalidFieldState { .. } => "invalid_field_state",
            Self::SignatureInvalid => "signature_invalid",
            Self::IssuerSubjectMismatch { .. } => "issuer_subject_mismatch",
            Self::RecipientMismatch { .. } => "recipient_mismatch",
            Self::ReplayedChallenge { .. } => "replayed_challenge",
            Self::Transport(_) => "transport",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

impl From<FrameError> for HandshakeError {
    fn from(err: FrameError) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<CryptoError> for HandshakeError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::UntrustedCertificate(msg) => Self::UntrustedCertificate(msg),
            other => Self::Certificate(other.to_string()),
        }
    }
}
