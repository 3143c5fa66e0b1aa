//! # Handshake Entities
//!
//! Results handed back to callers once a handshake has been built or
//! accepted.

use shared_types::{Identity, SessionKey};

/// Sealed handshake ready to send, plus what the initiator must remember.
#[derive(Debug, Clone)]
pub struct OutboundHandshake {
    /// Six-field wire encoding.
    pub wire: Vec<u8>,
    /// Challenge carried in the message.
    pub challenge: u32,
    /// Session key carried in the message.
    pub session_key: SessionKey,
}

/// Verified handshake from a trusted peer.
#[derive(Debug, Clone)]
pub struct EstablishedSession {
    /// Authenticated peer identity.
    pub peer: Identity,
    /// Challenge the peer chose.
    pub challenge: u32,
    /// Session key the peer chose.
    pub session_key: SessionKey,
}
