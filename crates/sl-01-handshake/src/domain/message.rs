//! # Handshake Message
//!
//! A single identity-establishment message: who is speaking, to whom, the
//! certificate vouching for the speaker, a session key and a challenge.
//!
//! ## Lifecycle
//!
//! ```text
//! issuer:    create -> assign_challenge -> sign -> seal_for_transmission -> wire
//! recipient: wire -> open_from_transmission -> check_signature -> check_certificate
//! ```
//!
//! The signature always covers the plaintext session key and challenge.
//! Sealing happens strictly after signing; verification strictly after
//! unsealing.
//!
//! ## Wire Format
//!
//! | # | Field | Content |
//! |---|-------|---------|
//! | 1 | issuer | UTF-8 identity |
//! | 2 | recipient | UTF-8 identity |
//! | 3 | certificate | X.509 DER |
//! | 4 | secret key | RSA-OAEP sealed |
//! | 5 | challenge | RSA-OAEP sealed (4 bytes big-endian inside) |
//! | 6 | signature | SHA256withRSA over fields 1-5 in plaintext form |

use crate::domain::errors::HandshakeError;
use crate::domain::field_state::FieldState;
use shared_crypto::{random_u32, Certificate, RsaKeyPair, RsaPublicKey, RsaSignature};
use shared_types::{decode_fields, encode_fields, Identity};
use zeroize::Zeroize;

/// Number of length-prefixed fields on the wire.
pub const FIELD_COUNT: usize = 6;

/// Challenge nonce width in bytes.
pub const CHALLENGE_LEN: usize = 4;

/// Handshake message, owned by a single handshake attempt.
#[derive(Clone, Debug)]
pub struct HandshakeMessage {
    issuer: Identity,
    recipient: Identity,
    certificate: Certificate,
    secret_key: FieldState,
    challenge: Option<FieldState>,
    signature: Option<RsaSignature>,
}

impl HandshakeMessage {
    /// New unsigned message with a plaintext session key and no challenge.
    pub fn create(
        issuer: Identity,
        recipient: Identity,
        certificate: Certificate,
        secret_key: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            issuer,
            recipient,
            certificate,
            secret_key: FieldState::Plaintext(secret_key.into()),
            challenge: None,
            signature: None,
        }
    }

    /// Draw a challenge from the OS random source and store it.
    ///
    /// Any existing signature is discarded since it no longer covers the
    /// message.
    pub fn assign_challenge(&mut self) -> u32 {
        let challenge = random_u32();
        self.set_challenge(challenge);
        challenge
    }

    /// Store a caller-chosen challenge.
    pub fn set_challenge(&mut self, challenge: u32) {
        self.challenge = Some(FieldState::Plaintext(challenge.to_be_bytes().to_vec()));
        self.signature = None;
    }

    /// Sign issuer, recipient, certificate, session key and challenge with
    /// the issuer's private key.
    ///
    /// # Errors
    ///
    /// - `ChallengeNotAssigned` if no challenge has been set.
    /// - `InvalidFieldState` if a field is already sealed.
    /// - `Signing` if the key cannot sign.
    pub fn sign(&mut self, issuer_key: &RsaKeyPair) -> Result<(), HandshakeError> {
        let mut data = self.signed_data()?;
        let result = issuer_key.sign(&data);
        data.zeroize();

        let signature = result.map_err(|e| HandshakeError::Signing(e.to_string()))?;
        self.signature = Some(signature);
        Ok(())
    }

    /// Verify the signature against the current plaintext fields and the
    /// embedded certificate's key, reporting why it failed.
    pub fn check_signature(&self) -> Result<(), HandshakeError> {
        let signature = self
            .signature
            .as_ref()
            .ok_or(HandshakeError::MissingSignature)?;
        let mut data = self.signed_data()?;
        let public_key = self.certificate.public_key();

        let result = match public_key {
            Ok(key) => key
                .verify(&data, signature)
                .map_err(|_| HandshakeError::SignatureInvalid),
            Err(e) => Err(HandshakeError::Certificate(e.to_string())),
        };
        data.zeroize();
        result
    }

    /// Boolean form of [`check_signature`](Self::check_signature). Never
    /// panics; every failure reads as `false`.
    pub fn verify_signature(&self) -> bool {
        self.check_signature().is_ok()
    }

    /// Seal the session key and challenge for `recipient_key` and encode the
    /// six wire fields.
    ///
    /// Returns `Ok(None)` if the message has no signature or no challenge.
    /// Both fields are sealed before either is replaced, so on error the
    /// message is left as it was.
    ///
    /// # Errors
    ///
    /// - `InvalidFieldState` if the message is already sealed.
    /// - `Sealing` if a field does not fit the recipient's key.
    pub fn seal_for_transmission(
        &mut self,
        recipient_key: &RsaPublicKey,
    ) -> Result<Option<Vec<u8>>, HandshakeError> {
        let (Some(signature), Some(challenge)) = (&self.signature, &self.challenge) else {
            return Ok(None);
        };

        let secret_plain = plaintext_of("secret_key", &self.secret_key)?;
        let challenge_plain = plaintext_of("challenge", challenge)?;

        let sealed_secret = recipient_key
            .seal(secret_plain)
            .map_err(|e| HandshakeError::Sealing(e.to_string()))?;
        let sealed_challenge = recipient_key
            .seal(challenge_plain)
            .map_err(|e| HandshakeError::Sealing(e.to_string()))?;

        let wire = encode_fields(&[
            self.issuer.as_bytes(),
            self.recipient.as_bytes(),
            self.certificate.as_der(),
            sealed_secret.as_slice(),
            sealed_challenge.as_slice(),
            signature.as_bytes(),
        ])?;

        self.secret_key = FieldState::Sealed(sealed_secret);
        self.challenge = Some(FieldState::Sealed(sealed_challenge));
        Ok(Some(wire))
    }

    /// Decode wire bytes and unseal the session key and challenge with the
    /// recipient's private key.
    ///
    /// The signature and certificate are not checked here.
    ///
    /// # Errors
    ///
    /// - Decode errors (`Framing`, `MalformedIdentity`, `Certificate`).
    /// - `Unseal` for a wrong key or corrupted ciphertext.
    /// - `MalformedChallenge` if the unsealed challenge is not 4 bytes.
    pub fn open_from_transmission(
        bytes: &[u8],
        recipient_key: &RsaKeyPair,
    ) -> Result<Self, HandshakeError> {
        let fields = decode_fields(bytes, FIELD_COUNT)?;

        let issuer = Identity::from_bytes(&fields[0])
            .ok_or(HandshakeError::MalformedIdentity { field: "issuer" })?;
        let recipient = Identity::from_bytes(&fields[1])
            .ok_or(HandshakeError::MalformedIdentity { field: "recipient" })?;
        let certificate = Certificate::from_der(&fields[2])
            .map_err(|e| HandshakeError::Certificate(e.to_string()))?;

        let secret_key = recipient_key
            .unseal(&fields[3])
            .map_err(|e| HandshakeError::Unseal(e.to_string()))?;
        let secret_key = FieldState::Plaintext(secret_key);

        let challenge = recipient_key
            .unseal(&fields[4])
            .map_err(|e| HandshakeError::Unseal(e.to_string()))?;
        let challenge = FieldState::Plaintext(challenge);
        if let Some(bytes) = challenge.as_plaintext() {
            if bytes.len() != CHALLENGE_LEN {
                return Err(HandshakeError::MalformedChallenge(bytes.len()));
            }
        }

        Ok(Self {
            issuer,
            recipient,
            certificate,
            secret_key,
            challenge: Some(challenge),
            signature: Some(RsaSignature::from_bytes(fields[5].clone())),
        })
    }

    /// Check that `authority` issued the embedded certificate and that it
    /// is currently valid.
    pub fn check_certificate(&self, authority: &Certificate) -> Result<(), HandshakeError> {
        self.certificate.verify_issued_by(authority)?;
        Ok(())
    }

    /// Boolean form of [`check_certificate`](Self::check_certificate).
    pub fn verify_certificate(&self, authority: &Certificate) -> bool {
        self.check_certificate(authority).is_ok()
    }

    /// Check that the claimed issuer is the certificate's subject common
    /// name.
    pub fn check_issuer_binding(&self) -> Result<(), HandshakeError> {
        let subject = self.certificate.subject_common_name();
        if subject.as_deref() == Some(self.issuer.as_str()) {
            Ok(())
        } else {
            Err(HandshakeError::IssuerSubjectMismatch {
                issuer: self.issuer.to_string(),
                subject,
            })
        }
    }

    /// Boolean form of [`check_issuer_binding`](Self::check_issuer_binding).
    pub fn verify_issuer_binding(&self) -> bool {
        self.check_issuer_binding().is_ok()
    }

    /// Claimed sender.
    pub fn issuer(&self) -> &Identity {
        &self.issuer
    }

    /// Intended receiver.
    pub fn recipient(&self) -> &Identity {
        &self.recipient
    }

    /// Embedded certificate.
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// Certificate issuer distinguished name, for display and audit.
    pub fn certificate_issuer_name(&self) -> String {
        self.certificate.issuer_name().to_string()
    }

    /// Certificate subject distinguished name, for display and audit.
    pub fn certificate_subject_name(&self) -> String {
        self.certificate.subject_name().to_string()
    }

    /// Plaintext challenge, if assigned and not sealed.
    pub fn challenge(&self) -> Option<u32> {
        let bytes = self.challenge.as_ref()?.as_plaintext()?;
        let array: [u8; CHALLENGE_LEN] = bytes.try_into().ok()?;
        Some(u32::from_be_bytes(array))
    }

    /// Plaintext session key, if not sealed.
    pub fn secret_key(&self) -> Option<&[u8]> {
        self.secret_key.as_plaintext()
    }

    /// Session key field in its current state.
    pub fn secret_key_state(&self) -> &FieldState {
        &self.secret_key
    }

    /// Challenge field in its current state.
    pub fn challenge_state(&self) -> Option<&FieldState> {
        self.challenge.as_ref()
    }

    /// Signature, if signed.
    pub fn signature(&self) -> Option<&RsaSignature> {
        self.signature.as_ref()
    }

    /// issuer ‖ recipient ‖ certificate DER ‖ secret key ‖ challenge
    fn signed_data(&self) -> Result<Vec<u8>, HandshakeError> {
        let challenge = self
            .challenge
            .as_ref()
            .ok_or(HandshakeError::ChallengeNotAssigned)?;
        let secret = plaintext_of("secret_key", &self.secret_key)?;
        let challenge = plaintext_of("challenge", challenge)?;

        let parts: [&[u8]; 5] = [
            self.issuer.as_bytes(),
            self.recipient.as_bytes(),
            self.certificate.as_der(),
            secret,
            challenge,
        ];
        Ok(parts.concat())
    }
}

fn plaintext_of<'a>(field: &'static str, state: &'a FieldState) -> Result<&'a [u8], HandshakeError> {
    state
        .as_plaintext()
        .ok_or(HandshakeError::InvalidFieldState {
            field,
            state: state.state_name(),
        })
}
