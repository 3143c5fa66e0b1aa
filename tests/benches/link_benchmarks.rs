//! # SecureLink Benchmarks
//!
//! | Subsystem | Operation | Dominant cost |
//! |-----------|-----------|---------------|
//! | sl-01 Handshake | initiate | RSA sign + 2x RSA-OAEP seal |
//! | sl-01 Handshake | accept | 2x RSA-OAEP unseal + 2x RSA verify |
//! | sl-02 Secure Channel | seal/open | AES-256-CBC + HMAC-SHA256, linear in payload |

use criterion::{criterion_group, criterion_main};
use sl_tests::benchmarks::{sl_01_handshake, sl_02_secure_channel};

criterion_group!(
    benches,
    sl_01_handshake::register_benchmarks,
    sl_02_secure_channel::register_benchmarks,
);
criterion_main!(benches);
