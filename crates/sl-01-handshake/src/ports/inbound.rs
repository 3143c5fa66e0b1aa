//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{EstablishedSession, OutboundHandshake};
use crate::domain::errors::HandshakeError;
use shared_crypto::RsaPublicKey;
use shared_types::Identity;

/// Primary Handshake API.
///
/// Implementations must be thread-safe (`Send + Sync`) so one instance can
/// serve every connection of a node.
pub trait HandshakeApi: Send + Sync {
    /// Build a signed, sealed handshake for `recipient`.
    ///
    /// A fresh session key and challenge are drawn for every call.
    fn initiate(
        &self,
        recipient: &Identity,
        recipient_key: &RsaPublicKey,
    ) -> Result<OutboundHandshake, HandshakeError>;

    /// Open and fully verify a received handshake.
    ///
    /// # Security
    /// Succeeds only if the message is addressed to the local identity, its
    /// signature and certificate verify, and its challenge is not a replay.
    fn accept(&self, wire: &[u8]) -> Result<EstablishedSession, HandshakeError>;
}
