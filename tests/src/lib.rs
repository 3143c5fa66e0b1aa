//! # SecureLink Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks per subsystem
//! │   ├── sl_01_handshake.rs
//! │   └── sl_02_secure_channel.rs
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── handshake_attacks.rs
//! │   └── channel_attacks.rs
//! │
//! ├── integration/      # Handshake followed by channel traffic
//! └── support.rs        # Shared certificates, keys and stream doubles
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sl-tests
//!
//! # By category
//! cargo test -p sl-tests integration::
//! cargo test -p sl-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p sl-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod benchmarks;
pub mod exploits;
pub mod integration;
pub mod support;
