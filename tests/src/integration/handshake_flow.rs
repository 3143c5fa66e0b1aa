//! # Handshake Flows
//!
//! Two services exchanging handshakes over TCP, plus the message-level
//! alice/bob example with a fixed challenge.

#[cfg(test)]
mod tests {
    use crate::support::{fixture, handshake_service, public_key};
    use shared_types::Identity;
    use sl_01_handshake::{HandshakeApi, HandshakeMessage};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    // =============================================================================
    // TCP HANDSHAKE
    // =============================================================================

    #[test]
    fn test_handshake_over_tcp_delivers_session_key() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let bob = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            handshake_service(&fixture().bob).receive_handshake(&mut stream)
        });

        let alice = handshake_service(&fixture().alice);
        let mut stream = TcpStream::connect(addr).unwrap();
        let outbound = alice
            .send_handshake(&mut stream, &Identity::new("bob"), &public_key(&fixture().bob))
            .unwrap();

        let session = bob.join().unwrap().unwrap();
        assert_eq!(session.peer, Identity::new("alice"));
        assert_eq!(session.challenge, outbound.challenge);
        assert_eq!(session.session_key, outbound.session_key);
        assert_eq!(session.session_key.len(), 32);
    }

    #[test]
    fn test_mutual_handshakes_produce_independent_keys() {
        let alice = handshake_service(&fixture().alice);
        let bob = handshake_service(&fixture().bob);

        let to_bob = alice
            .initiate(&Identity::new("bob"), &public_key(&fixture().bob))
            .unwrap();
        let to_alice = bob
            .initiate(&Identity::new("alice"), &public_key(&fixture().alice))
            .unwrap();

        let at_bob = bob.accept(&to_bob.wire).unwrap();
        let at_alice = alice.accept(&to_alice.wire).unwrap();

        assert_eq!(at_bob.peer.as_str(), "alice");
        assert_eq!(at_alice.peer.as_str(), "bob");
        assert_ne!(at_bob.session_key, at_alice.session_key);
    }

    #[test]
    fn test_many_sequential_handshakes_accepted() {
        let alice = handshake_service(&fixture().alice);
        let bob = handshake_service(&fixture().bob);

        for _ in 0..5 {
            let outbound = alice
                .initiate(&Identity::new("bob"), &public_key(&fixture().bob))
                .unwrap();
            assert!(bob.accept(&outbound.wire).is_ok());
        }
    }

    // =============================================================================
    // MESSAGE API
    // =============================================================================

    #[test]
    fn test_alice_bob_example_with_fixed_challenge() {
        let fx = fixture();
        let mut message = HandshakeMessage::create(
            Identity::new("alice"),
            Identity::new("bob"),
            fx.alice.certificate.clone(),
            b"0123456789abcdef0123456789abcdef",
        );
        message.set_challenge(0x0102_0304);
        message.sign(&fx.alice.key_pair).unwrap();
        let wire = message
            .seal_for_transmission(&public_key(&fx.bob))
            .unwrap()
            .unwrap();

        let received = HandshakeMessage::open_from_transmission(&wire, &fx.bob.key_pair).unwrap();
        assert!(received.verify_signature());
        assert!(received.verify_certificate(&fx.ca_cert));
        assert!(received.verify_issuer_binding());
        assert_eq!(received.issuer().as_str(), "alice");
        assert_eq!(received.recipient().as_str(), "bob");
        assert_eq!(received.challenge(), Some(0x0102_0304));
        assert_eq!(
            received.secret_key(),
            Some(&b"0123456789abcdef0123456789abcdef"[..])
        );
    }
}
