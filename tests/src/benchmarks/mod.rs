//! # SecureLink Benchmarks
//!
//! Criterion benchmarks per subsystem, driven from `benches/link_benchmarks.rs`.

pub mod sl_02_secure_channel;
