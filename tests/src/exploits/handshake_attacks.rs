//! # Handshake Attacks
//!
//! | Attack | Expected rejection |
//! |--------|--------------------|
//! | Replay of a captured handshake | `ReplayedChallenge` |
//! | Byte flips anywhere in the wire | any error, original still accepted |
//! | Issuer name not matching certificate | `IssuerSubjectMismatch` |
//! | Certificate from an unknown authority | `UntrustedCertificate` |
//! | Expired certificate | `UntrustedCertificate` |
//! | Handshake redirected to another recipient | `RecipientMismatch` |
//! | Oversized frame | `Transport` before allocation |

#[cfg(test)]
mod tests {
    use crate::support::{fixture, generate_key, handshake_service, public_key, RecordingStream};
    use shared_crypto::testing::issue_leaf_with_validity;
    use shared_types::Identity;
    use sl_01_handshake::{HandshakeApi, HandshakeError, LocalCredentials};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn alice_to_bob() -> Vec<u8> {
        handshake_service(&fixture().alice)
            .initiate(&Identity::new("bob"), &public_key(&fixture().bob))
            .unwrap()
            .wire
    }

    #[test]
    fn test_replayed_handshake_rejected() {
        let bob = handshake_service(&fixture().bob);
        let wire = alice_to_bob();

        assert!(bob.accept(&wire).is_ok());
        assert!(matches!(
            bob.accept(&wire),
            Err(HandshakeError::ReplayedChallenge { .. })
        ));
    }

    #[test]
    fn test_replay_to_second_responder_instance_is_independent() {
        // Replay state is per service instance.
        let wire = alice_to_bob();
        assert!(handshake_service(&fixture().bob).accept(&wire).is_ok());
        assert!(handshake_service(&fixture().bob).accept(&wire).is_ok());
    }

    #[test]
    fn test_tampered_wire_rejected() {
        let bob = handshake_service(&fixture().bob);
        let wire = alice_to_bob();

        for i in (0..wire.len()).step_by(7) {
            let mut tampered = wire.clone();
            tampered[i] ^= 0x20;
            assert!(bob.accept(&tampered).is_err(), "flip at byte {i} accepted");
        }

        // Rejections never reach the replay cache.
        assert!(bob.accept(&wire).is_ok());
    }

    #[test]
    fn test_truncated_and_padded_wire_rejected() {
        let bob = handshake_service(&fixture().bob);
        let wire = alice_to_bob();

        let err = bob.accept(&wire[..wire.len() - 1]).unwrap_err();
        assert!(err.is_decode_error());

        let mut padded = wire.clone();
        padded.push(0);
        assert!(bob.accept(&padded).unwrap_err().is_decode_error());
    }

    #[test]
    fn test_impostor_issuer_rejected() {
        let impostor = handshake_service(&fixture().impostor);
        let wire = impostor
            .initiate(&Identity::new("bob"), &public_key(&fixture().bob))
            .unwrap()
            .wire;

        let err = handshake_service(&fixture().bob).accept(&wire).unwrap_err();
        assert!(matches!(
            err,
            HandshakeError::IssuerSubjectMismatch { ref issuer, ref subject }
                if issuer == "carol" && subject.as_deref() == Some("dave")
        ));
    }

    #[test]
    fn test_outsider_certificate_rejected() {
        let outsider = handshake_service(&fixture().outsider);
        let wire = outsider
            .initiate(&Identity::new("bob"), &public_key(&fixture().bob))
            .unwrap()
            .wire;

        assert!(matches!(
            handshake_service(&fixture().bob).accept(&wire),
            Err(HandshakeError::UntrustedCertificate(_))
        ));
    }

    #[test]
    fn test_expired_certificate_rejected() {
        let fx = fixture();
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
        let key_pair = generate_key();
        let certificate = issue_leaf_with_validity(
            "frank",
            &key_pair.public_key(),
            &fx.ca_cert,
            &fx.ca_key,
            now - Duration::from_secs(2 * 86_400),
            now - Duration::from_secs(86_400),
        )
        .unwrap();
        let frank = LocalCredentials {
            identity: Identity::new("frank"),
            key_pair,
            certificate,
        };

        let wire = handshake_service(&frank)
            .initiate(&Identity::new("bob"), &public_key(&fx.bob))
            .unwrap()
            .wire;
        assert!(matches!(
            handshake_service(&fx.bob).accept(&wire),
            Err(HandshakeError::UntrustedCertificate(_))
        ));
    }

    #[test]
    fn test_redirected_handshake_rejected() {
        // Mallory's name, bob's key: bob can unseal but is not the recipient.
        let wire = handshake_service(&fixture().alice)
            .initiate(&Identity::new("mallory"), &public_key(&fixture().bob))
            .unwrap()
            .wire;

        assert!(matches!(
            handshake_service(&fixture().bob).accept(&wire),
            Err(HandshakeError::RecipientMismatch { .. })
        ));
    }

    #[test]
    fn test_handshake_for_other_key_cannot_be_unsealed() {
        let wire = handshake_service(&fixture().alice)
            .initiate(&Identity::new("bob"), &public_key(&fixture().outsider))
            .unwrap()
            .wire;

        assert!(matches!(
            handshake_service(&fixture().bob).accept(&wire),
            Err(HandshakeError::Unseal(_))
        ));
    }

    #[test]
    fn test_oversized_handshake_frame_rejected() {
        let bob = handshake_service(&fixture().bob);
        let mut stream = RecordingStream::new((1u32 << 30).to_be_bytes().to_vec());

        assert!(matches!(
            bob.receive_handshake(&mut stream),
            Err(HandshakeError::Transport(_))
        ));
    }
}
