//! Shared fixtures.
//!
//! RSA keys are 1024-bit to keep generation fast; sealing still fits the
//! 32-byte session key and 4-byte challenge (limit 62 bytes).

use shared_crypto::testing::{issue_leaf, issue_self_signed};
use shared_crypto::{Certificate, RsaKeyPair, RsaPublicKey};
use shared_types::{Clock, Identity, SessionKey};
use sl_01_handshake::{HandshakeConfig, HandshakeService, LocalCredentials, StaticTrustStore};
use sl_02_secure_channel::{ChannelConfig, ChannelKeys, SecureChannel};
use std::io::{Cursor, Read, Write};
use std::sync::OnceLock;

/// Key size used by every fixture.
pub const FIXTURE_KEY_BITS: usize = 1024;

/// Everything the suite needs to run handshakes.
pub struct Fixture {
    /// Authority trusted by every service built here.
    pub ca_cert: Certificate,
    /// Private key of the trusted authority.
    pub ca_key: RsaKeyPair,
    pub alice: LocalCredentials,
    pub bob: LocalCredentials,
    /// Claims to be "carol" but holds a certificate issued to "dave".
    pub impostor: LocalCredentials,
    /// "eve", certified by an authority nobody trusts.
    pub outsider: LocalCredentials,
}

/// Lazily built, process-wide fixture.
pub fn fixture() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let ca_key = generate_key();
        let ca_cert = issue_self_signed("SecureLink Test CA", &ca_key).expect("issue CA");

        let rogue_key = generate_key();
        let rogue_cert = issue_self_signed("Rogue CA", &rogue_key).expect("issue rogue CA");

        Fixture {
            alice: credentials("alice", "alice", &ca_cert, &ca_key),
            bob: credentials("bob", "bob", &ca_cert, &ca_key),
            impostor: credentials("carol", "dave", &ca_cert, &ca_key),
            outsider: credentials("eve", "eve", &rogue_cert, &rogue_key),
            ca_cert,
            ca_key,
        }
    })
}

/// Fresh fixture-sized key pair.
pub fn generate_key() -> RsaKeyPair {
    RsaKeyPair::generate_with_bits(FIXTURE_KEY_BITS).expect("generate RSA key")
}

/// Credentials for `identity` with a certificate for `common_name`.
pub fn credentials(
    identity: &str,
    common_name: &str,
    issuer_cert: &Certificate,
    issuer_key: &RsaKeyPair,
) -> LocalCredentials {
    let key_pair = generate_key();
    let certificate = issue_leaf(common_name, &key_pair.public_key(), issuer_cert, issuer_key)
        .expect("issue leaf certificate");
    LocalCredentials {
        identity: Identity::new(identity),
        key_pair,
        certificate,
    }
}

/// Handshake service trusting the fixture authority.
pub fn handshake_service(credentials: &LocalCredentials) -> HandshakeService<StaticTrustStore> {
    handshake_service_with(credentials, HandshakeConfig::default())
}

/// Handshake service with an explicit configuration.
pub fn handshake_service_with(
    credentials: &LocalCredentials,
    config: HandshakeConfig,
) -> HandshakeService<StaticTrustStore> {
    let trust = StaticTrustStore::new(vec![fixture().ca_cert.clone()]);
    HandshakeService::new(credentials.clone(), trust, config).expect("valid handshake config")
}

/// Public key of a party, as the initiator would know it.
pub fn public_key(credentials: &LocalCredentials) -> RsaPublicKey {
    credentials.key_pair.public_key()
}

/// Channel over keys derived from `session_key`.
pub fn channel_for(session_key: &SessionKey, config: ChannelConfig) -> SecureChannel {
    let keys = ChannelKeys::derive(session_key).expect("derive channel keys");
    SecureChannel::new(keys, config).expect("valid channel config")
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

/// In-memory stream: reads scripted input, records everything written.
#[derive(Debug, Default)]
pub struct RecordingStream {
    input: Cursor<Vec<u8>>,
    /// Bytes written so far.
    pub written: Vec<u8>,
}

impl RecordingStream {
    pub fn new(input: Vec<u8>) -> Self {
        Self {
            input: Cursor::new(input),
            written: Vec::new(),
        }
    }
}

impl Read for RecordingStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for RecordingStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
