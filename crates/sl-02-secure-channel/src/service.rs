//! # Secure Channel Service
//!
//! Blocking implementation of `SecureChannelApi` over any `Read + Write`
//! stream.
//!
//! ## Exchange (echo mode)
//!
//! ```text
//! receiver                         sender
//!    |---- challenge (4 bytes) ------>|
//!    |<--- len (4, BE) || ciphertext -|
//! ```
//!
//! In advisory mode the sender does not read the challenge and the MAC does
//! not cover it.

use crate::config::{ChallengeMode, ChannelConfig};
use crate::domain::envelope::{open_envelope, seal_envelope, CHALLENGE_LEN};
use crate::domain::errors::ChannelError;
use crate::domain::keys::ChannelKeys;
use crate::metrics;
use crate::ports::inbound::SecureChannelApi;
use crate::ports::outbound::{Clock, SystemClock};
use shared_crypto::random_u32;
use shared_types::{read_frame, write_frame};
use std::io::{Read, Write};
use tracing::{debug, warn};

/// Secure channel bound to one pair of keys.
///
/// Holds no per-message state; one instance may serve both directions of
/// a stream, or many streams.
pub struct SecureChannel<C: Clock = SystemClock> {
    keys: ChannelKeys,
    config: ChannelConfig,
    clock: C,
}

impl SecureChannel<SystemClock> {
    /// Create a channel measuring freshness against the system clock.
    pub fn new(keys: ChannelKeys, config: ChannelConfig) -> Result<Self, ChannelError> {
        Self::with_clock(keys, config, SystemClock)
    }
}

impl<C: Clock> SecureChannel<C> {
    /// Create a channel with an explicit clock.
    ///
    /// # Errors
    /// Returns `ChannelError::InvalidConfig` if `config` fails validation.
    pub fn with_clock(keys: ChannelKeys, config: ChannelConfig, clock: C) -> Result<Self, ChannelError> {
        config.validate()?;
        Ok(Self {
            keys,
            config,
            clock,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Seal `payload` stamped with the current time.
    pub(crate) fn seal(
        &self,
        payload: &[u8],
        challenge: Option<&[u8; CHALLENGE_LEN]>,
    ) -> Result<Vec<u8>, ChannelError> {
        seal_envelope(&self.keys, payload, self.clock.now_millis(), challenge)
    }

    /// Open a received ciphertext and record the outcome.
    pub(crate) fn open(
        &self,
        ciphertext: &[u8],
        challenge: &[u8; CHALLENGE_LEN],
    ) -> Result<Vec<u8>, ChannelError> {
        let result = open_envelope(
            &self.keys,
            ciphertext,
            self.bound(challenge),
            self.clock.now_millis(),
            self.config.freshness_window_ms,
        );
        match &result {
            Ok(payload) => {
                metrics::record_received(payload.len());
                debug!("[sl-02] Received message ({} bytes)", payload.len());
            }
            Err(e) => self.record_rejection(e),
        }
        result
    }

    /// Whether the sender must read the receiver's challenge.
    pub(crate) fn echoes_challenge(&self) -> bool {
        self.config.challenge_mode == ChallengeMode::Echo
    }

    pub(crate) fn record_sent(&self, payload_len: usize, frame_len: usize) {
        metrics::record_sent(payload_len);
        debug!(
            "[sl-02] Sent message ({} bytes payload, {} bytes ciphertext)",
            payload_len, frame_len
        );
    }

    pub(crate) fn record_rejection(&self, err: &ChannelError) {
        metrics::record_rejected(err.reason());
        warn!("[sl-02] Message rejected: {}", err);
    }

    fn bound<'a>(&self, challenge: &'a [u8; CHALLENGE_LEN]) -> Option<&'a [u8; CHALLENGE_LEN]> {
        self.echoes_challenge().then_some(challenge)
    }
}

/// Fresh receiver challenge from the OS random source.
pub(crate) fn new_challenge() -> [u8; CHALLENGE_LEN] {
    random_u32().to_be_bytes()
}

impl<C: Clock> SecureChannelApi for SecureChannel<C> {
    fn send<S: Read + Write>(&self, stream: &mut S, payload: &[u8]) -> Result<(), ChannelError> {
        let challenge = if self.echoes_challenge() {
            let mut challenge = [0u8; CHALLENGE_LEN];
            stream.read_exact(&mut challenge)?;
            Some(challenge)
        } else {
            None
        };

        let ciphertext = self.seal(payload, challenge.as_ref())?;
        write_frame(stream, &ciphertext)?;
        self.record_sent(payload.len(), ciphertext.len());
        Ok(())
    }

    fn receive<S: Read + Write>(&self, stream: &mut S) -> Result<Vec<u8>, ChannelError> {
        let challenge = new_challenge();
        stream.write_all(&challenge)?;
        stream.flush()?;

        let ciphertext = match read_frame(stream, self.config.max_frame_len) {
            Ok(ciphertext) => ciphertext,
            Err(e) => {
                let err = ChannelError::from(e);
                self.record_rejection(&err);
                return Err(err);
            }
        };
        self.open(&ciphertext, &challenge)
    }
}
