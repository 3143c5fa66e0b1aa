//! # Handshake → Channel Flows
//!
//! The initiator and the responder each derive channel keys from the
//! handshake's session key, then talk over the same connection.

#[cfg(test)]
mod tests {
    use crate::support::{channel_for, fixture, handshake_service, public_key};
    use link_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
    use shared_types::Identity;
    use sl_01_handshake::HandshakeApi;
    use sl_02_secure_channel::{ChannelConfig, SecureChannelApi};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    fn payloads() -> Vec<Vec<u8>> {
        vec![Vec::new(), vec![0x7F], (0..8 * 1024).map(|i| i as u8).collect()]
    }

    #[test]
    fn test_handshake_then_channel_over_one_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let bob = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let session = handshake_service(&fixture().bob)
                .receive_handshake(&mut stream)
                .unwrap();
            let channel = channel_for(&session.session_key, ChannelConfig::default());

            let mut received = Vec::new();
            for _ in 0..payloads().len() {
                received.push(channel.receive(&mut stream).unwrap());
            }
            channel.send(&mut stream, b"all received").unwrap();
            received
        });

        let mut stream = TcpStream::connect(addr).unwrap();
        let outbound = handshake_service(&fixture().alice)
            .send_handshake(&mut stream, &Identity::new("bob"), &public_key(&fixture().bob))
            .unwrap();
        let channel = channel_for(&outbound.session_key, ChannelConfig::default());

        for payload in payloads() {
            channel.send(&mut stream, &payload).unwrap();
        }
        let reply = channel.receive(&mut stream).unwrap();

        assert_eq!(reply, b"all received");
        assert_eq!(bob.join().unwrap(), payloads());
    }

    #[tokio::test]
    async fn test_async_channel_over_tokio_tcp() {
        let alice = handshake_service(&fixture().alice);
        let bob = handshake_service(&fixture().bob);
        let outbound = alice
            .initiate(&Identity::new("bob"), &public_key(&fixture().bob))
            .unwrap();
        let session = bob.accept(&outbound.wire).unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let channel = channel_for(&session.session_key, ChannelConfig::default());
            let request = channel.receive_async(&mut stream).await.unwrap();
            channel
                .send_async(&mut stream, &[b"echo:".as_slice(), request.as_slice()].concat())
                .await
                .unwrap();
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let channel = channel_for(&outbound.session_key, ChannelConfig::default());
        channel.send_async(&mut stream, b"hello").await.unwrap();
        let reply = channel.receive_async(&mut stream).await.unwrap();
        server.await.unwrap();

        assert_eq!(reply, b"echo:hello");
    }

    #[test]
    fn test_traffic_with_telemetry_installed() {
        let config = TelemetryConfig {
            console_output: false,
            ..Default::default()
        };
        // Only the first installer in the process wins.
        let _guard = init_telemetry(config).ok();

        let outbound = handshake_service(&fixture().alice)
            .initiate(&Identity::new("bob"), &public_key(&fixture().bob))
            .unwrap();
        handshake_service(&fixture().bob).accept(&outbound.wire).unwrap();

        let text = encode_metrics().unwrap();
        assert!(text.contains("handshake_accepted_total"));
    }
}
