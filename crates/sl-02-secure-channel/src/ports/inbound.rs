//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::ChannelError;
use std::io::{Read, Write};

/// Blocking secure channel API over a caller-owned byte stream.
pub trait SecureChannelApi {
    /// Timestamp, authenticate, encrypt and frame `payload`, then flush.
    ///
    /// In echo mode this first reads the peer's 4-byte challenge.
    fn send<S: Read + Write>(&self, stream: &mut S, payload: &[u8]) -> Result<(), ChannelError>;

    /// Write a fresh challenge, then read, decrypt and verify one frame.
    ///
    /// # Security
    /// Every verification failure is reported as
    /// `ChannelError::VerificationFailed`, without saying which check failed.
    fn receive<S: Read + Write>(&self, stream: &mut S) -> Result<Vec<u8>, ChannelError>;
}
