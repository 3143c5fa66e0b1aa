//! # Channel Attacks
//!
//! A captured or modified unit must never reach the application. All
//! verification failures surface as the same `VerificationFailed` error.

#[cfg(test)]
mod tests {
    use crate::support::{FixedClock, RecordingStream};
    use shared_types::{current_timestamp_millis, Clock, SessionKey};
    use sl_02_secure_channel::{
        ChallengeMode, ChannelConfig, ChannelError, ChannelKeys, SecureChannel, SecureChannelApi,
    };

    fn keys() -> ChannelKeys {
        ChannelKeys::derive(&SessionKey::from_bytes(vec![0x5C; 32])).unwrap()
    }

    fn channel(mode: ChallengeMode) -> SecureChannel {
        let config = ChannelConfig {
            challenge_mode: mode,
            ..Default::default()
        };
        SecureChannel::new(keys(), config).unwrap()
    }

    /// Frame the sender writes when the receiver's challenge is `challenge`.
    fn capture<C: Clock>(sender: &SecureChannel<C>, challenge: [u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut stream = RecordingStream::new(challenge.to_vec());
        sender.send(&mut stream, payload).unwrap();
        stream.written
    }

    fn deliver(receiver: &SecureChannel, frame: Vec<u8>) -> Result<Vec<u8>, ChannelError> {
        receiver.receive(&mut RecordingStream::new(frame))
    }

    #[test]
    fn test_captured_unit_replay_rejected_in_echo_mode() {
        let channel = channel(ChallengeMode::Echo);
        let frame = capture(&channel, [0xDE, 0xAD, 0xBE, 0xEF], b"transfer 100");

        assert!(matches!(
            deliver(&channel, frame),
            Err(ChannelError::VerificationFailed)
        ));
    }

    #[test]
    fn test_advisory_mode_accepts_replay_within_window() {
        // Advisory mode has no replay protection inside the freshness window.
        let channel = channel(ChallengeMode::Advisory);
        let frame = capture(&channel, [0; 4], b"transfer 100");

        assert_eq!(deliver(&channel, frame.clone()).unwrap(), b"transfer 100");
        assert_eq!(deliver(&channel, frame).unwrap(), b"transfer 100");
    }

    #[test]
    fn test_stale_and_future_units_rejected() {
        let receiver = channel(ChallengeMode::Advisory);
        let now = current_timestamp_millis();
        let config = ChannelConfig {
            challenge_mode: ChallengeMode::Advisory,
            ..Default::default()
        };

        for skew in [now - 10_000, now + 10_000] {
            let sender = SecureChannel::with_clock(keys(), config.clone(), FixedClock(skew)).unwrap();
            let frame = capture(&sender, [0; 4], b"late");
            assert!(matches!(
                deliver(&receiver, frame),
                Err(ChannelError::VerificationFailed)
            ));
        }
    }

    #[test]
    fn test_bit_flips_rejected() {
        let channel = channel(ChallengeMode::Advisory);
        let frame = capture(&channel, [0; 4], b"integrity matters");

        // Skip the length prefix; flipping it is a framing fault instead.
        for i in 4..frame.len() {
            let mut tampered = frame.clone();
            tampered[i] ^= 0x04;
            assert!(matches!(
                deliver(&channel, tampered),
                Err(ChannelError::VerificationFailed)
            ));
        }
    }

    #[test]
    fn test_block_truncation_rejected() {
        let channel = channel(ChallengeMode::Advisory);
        let frame = capture(&channel, [0; 4], &[0xAA; 64]);

        let ciphertext = &frame[4..frame.len() - 16];
        let mut truncated = (ciphertext.len() as u32).to_be_bytes().to_vec();
        truncated.extend_from_slice(ciphertext);

        assert!(matches!(
            deliver(&channel, truncated),
            Err(ChannelError::VerificationFailed)
        ));
    }

    #[test]
    fn test_unit_from_other_session_rejected() {
        let sender = channel(ChallengeMode::Advisory);
        let frame = capture(&sender, [0; 4], b"cross-session");

        let other = SecureChannel::new(
            ChannelKeys::derive(&SessionKey::from_bytes(vec![0x5D; 32])).unwrap(),
            ChannelConfig {
                challenge_mode: ChallengeMode::Advisory,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(matches!(
            deliver(&other, frame),
            Err(ChannelError::VerificationFailed)
        ));
    }

    #[test]
    fn test_oversized_length_prefix_rejected_before_read() {
        let channel = channel(ChallengeMode::Echo);
        let frame = u32::MAX.to_be_bytes().to_vec();

        assert!(matches!(
            deliver(&channel, frame),
            Err(ChannelError::FrameTooLarge { .. })
        ));
    }
}
