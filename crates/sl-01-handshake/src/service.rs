//! # Handshake Service
//!
//! Application service layer that implements the `HandshakeApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`HandshakeApi`)
//! - Uses the outbound port (`TrustStore`) to find certificate authorities
//! - Delegates message construction and verification to the domain layer
//!
//! ## Acceptance Checks (in order)
//!
//! 1. Wire decodes and both sealed fields unseal with the local key
//! 2. Recipient is the local identity
//! 3. Signature verifies under the embedded certificate
//! 4. Certificate chains to a trusted authority and is within validity
//! 5. Issuer is the certificate subject (unless disabled)
//! 6. `(issuer, challenge)` was not accepted within the replay window
//!
//! ## Replay Protection Is Time-Limited
//!
//! Check 6 only remembers a pair for `replay_window_secs`. The message has
//! no timestamp, so once the window has passed a captured handshake is
//! accepted again and yields the same session key. A full replay cache also
//! evicts its oldest live entry early. Callers that need stronger guarantees
//! must bind the session to something fresh, such as the channel challenge.

use crate::config::HandshakeConfig;
use crate::domain::entities::{EstablishedSession, OutboundHandshake};
use crate::domain::errors::HandshakeError;
use crate::domain::message::HandshakeMessage;
use crate::metrics;
use crate::ports::inbound::HandshakeApi;
use crate::ports::outbound::TrustStore;
use shared_crypto::{random_bytes, Certificate, RsaKeyPair, RsaPublicKey};
use shared_types::{read_frame, write_frame, Identity, ReplayCache, SessionKey};
use std::io::{Read, Write};
use std::time::Duration;
use tracing::{debug, warn};

/// Who this node is: its name, private key and certificate.
#[derive(Debug, Clone)]
pub struct LocalCredentials {
    /// Local identity, matched against incoming recipients.
    pub identity: Identity,
    /// Private key for signing and unsealing.
    pub key_pair: RsaKeyPair,
    /// Certificate binding `identity` to `key_pair`.
    pub certificate: Certificate,
}

/// Handshake Service.
///
/// One instance may be shared by every connection thread; the replay cache
/// is internally synchronized.
pub struct HandshakeService<T: TrustStore> {
    credentials: LocalCredentials,
    trust_store: T,
    config: HandshakeConfig,
    replay_cache: ReplayCache<(Identity, u32)>,
}

impl<T: TrustStore> HandshakeService<T> {
    /// Create a new handshake service.
    ///
    /// # Errors
    /// Returns `HandshakeError::InvalidConfig` if `config` fails validation.
    pub fn new(
        credentials: LocalCredentials,
        trust_store: T,
        config: HandshakeConfig,
    ) -> Result<Self, HandshakeError> {
        config.validate()?;
        let replay_cache = ReplayCache::new(Duration::from_secs(config.replay_window_secs));
        Ok(Self {
            credentials,
            trust_store,
            config,
            replay_cache,
        })
    }

    /// Local identity.
    pub fn identity(&self) -> &Identity {
        &self.credentials.identity
    }

    /// Active configuration.
    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    /// Build a handshake for `recipient` and write it as one frame.
    pub fn send_handshake<W: Write>(
        &self,
        writer: &mut W,
        recipient: &Identity,
        recipient_key: &RsaPublicKey,
    ) -> Result<OutboundHandshake, HandshakeError> {
        let outbound = self.initiate(recipient, recipient_key)?;
        write_frame(writer, &outbound.wire)?;
        Ok(outbound)
    }

    /// Read one handshake frame and accept it.
    pub fn receive_handshake<R: Read>(
        &self,
        reader: &mut R,
    ) -> Result<EstablishedSession, HandshakeError> {
        let wire = match read_frame(reader, self.config.max_message_len) {
            Ok(wire) => wire,
            Err(e) => {
                let err = HandshakeError::from(e);
                metrics::record_rejected(err.reason());
                warn!("[sl-01] Handshake frame unreadable: {}", err);
                return Err(err);
            }
        };
        self.accept(&wire)
    }

    fn verify(&self, wire: &[u8]) -> Result<EstablishedSession, HandshakeError> {
        let message = HandshakeMessage::open_from_transmission(wire, &self.credentials.key_pair)?;

        if message.recipient() != &self.credentials.identity {
            return Err(HandshakeError::RecipientMismatch {
                expected: self.credentials.identity.to_string(),
                actual: message.recipient().to_string(),
            });
        }

        message.check_signature()?;

        let authority = self
            .trust_store
            .authority_for(message.certificate())
            .ok_or_else(|| {
                HandshakeError::UntrustedCertificate(format!(
                    "no trusted authority named '{}'",
                    message.certificate_issuer_name()
                ))
            })?;
        message.check_certificate(&authority)?;

        if self.config.require_issuer_binding {
            message.check_issuer_binding()?;
        }

        let challenge = message
            .challenge()
            .ok_or(HandshakeError::ChallengeNotAssigned)?;
        if !self
            .replay_cache
            .check_and_insert((message.issuer().clone(), challenge))
        {
            return Err(HandshakeError::ReplayedChallenge {
                issuer: message.issuer().to_string(),
                challenge,
            });
        }

        let secret = message
            .secret_key()
            .ok_or(HandshakeError::InvalidFieldState {
                field: "secret_key",
                state: "sealed",
            })?;

        Ok(EstablishedSession {
            peer: message.issuer().clone(),
            challenge,
            session_key: SessionKey::from_bytes(secret),
        })
    }
}

impl<T: TrustStore> HandshakeApi for HandshakeService<T> {
    fn initiate(
        &self,
        recipient: &Identity,
        recipient_key: &RsaPublicKey,
    ) -> Result<OutboundHandshake, HandshakeError> {
        if self.config.session_key_len > recipient_key.max_seal_len() {
            return Err(HandshakeError::InvalidConfig(format!(
                "session_key_len {} exceeds the {} bytes a {}-bit key can seal",
                self.config.session_key_len,
                recipient_key.max_seal_len(),
                recipient_key.bits()
            )));
        }

        let session_key = SessionKey::from_bytes(random_bytes(self.config.session_key_len));

        let mut message = HandshakeMessage::create(
            self.credentials.identity.clone(),
            recipient.clone(),
            self.credentials.certificate.clone(),
            session_key.as_bytes(),
        );
        let challenge = message.assign_challenge();
        message.sign(&self.credentials.key_pair)?;

        let wire = message
            .seal_for_transmission(recipient_key)?
            .ok_or(HandshakeError::MissingSignature)?;

        metrics::record_initiated();
        debug!(
            "[sl-01] Initiated handshake {} -> {} ({} bytes)",
            self.credentials.identity,
            recipient,
            wire.len()
        );

        Ok(OutboundHandshake {
            wire,
            challenge,
            session_key,
        })
    }

    fn accept(&self, wire: &[u8]) -> Result<EstablishedSession, HandshakeError> {
        match self.verify(wire) {
            Ok(session) => {
                metrics::record_accepted();
                debug!("[sl-01] Accepted handshake from {}", session.peer);
                Ok(session)
            }
            Err(e) => {
                metrics::record_rejected(e.reason());
                warn!(reason = e.reason(), "[sl-01] Handshake rejected: {}", e);
                Err(e)
            }
        }
    }
}
