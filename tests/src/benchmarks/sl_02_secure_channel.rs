//! # SL-02 Secure Channel Benchmarks
//!
//! Envelope sealing and opening across payload sizes, and key derivation.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::RngCore;
use shared_types::{current_timestamp_millis, SessionKey};
use sl_02_secure_channel::{open_envelope, seal_envelope, ChannelKeys};

const WINDOW_MS: u64 = 60_000;

fn random_payload(size: usize) -> Vec<u8> {
    let mut payload = vec![0u8; size];
    rand::thread_rng().fill_bytes(&mut payload);
    payload
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("sl-02/envelope");
    let keys = ChannelKeys::derive(&SessionKey::from_bytes(vec![0x42; 32])).unwrap();
    let challenge = [1u8, 2, 3, 4];

    for size in [0usize, 64, 1024, 16 * 1024, 256 * 1024] {
        let payload = random_payload(size);
        let now = current_timestamp_millis();
        let sealed = seal_envelope(&keys, &payload, now, Some(&challenge)).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("seal", size), &payload, |b, payload| {
            b.iter(|| black_box(seal_envelope(&keys, payload, now, Some(&challenge)).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("open", size), &sealed, |b, sealed| {
            b.iter(|| {
                black_box(open_envelope(&keys, sealed, Some(&challenge), now, WINDOW_MS).unwrap())
            })
        });
    }

    group.finish();
}

pub fn bench_tampered_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("sl-02/rejection");
    let keys = ChannelKeys::derive(&SessionKey::from_bytes(vec![0x42; 32])).unwrap();
    let now = current_timestamp_millis();

    let mut tampered = seal_envelope(&keys, &random_payload(1024), now, None).unwrap();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;

    group.bench_function("open_tampered_1k", |b| {
        b.iter(|| black_box(open_envelope(&keys, &tampered, None, now, WINDOW_MS).is_err()))
    });

    group.finish();
}

pub fn bench_key_derivation(c: &mut Criterion) {
    let session_key = SessionKey::from_bytes(vec![0x42; 32]);
    c.bench_function("sl-02/derive_channel_keys", |b| {
        b.iter(|| black_box(ChannelKeys::derive(&session_key).unwrap()))
    });
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_envelope(c);
    bench_tampered_open(c);
    bench_key_derivation(c);
}
