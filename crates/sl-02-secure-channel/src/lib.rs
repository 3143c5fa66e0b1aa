//! # Secure Channel Subsystem (SL-02)
//!
//! Carries authenticated, encrypted, freshness-checked messages over an
//! already-open byte stream, using keys agreed by the handshake (SL-01).
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): envelope sealing/opening, keys, freshness
//! - **Ports Layer** (`ports/`): inbound `SecureChannelApi`, outbound `Clock`
//! - **Service Layer** (`service.rs`): blocking send/receive over `Read + Write`
//! - **Adapters Layer** (`adapters/`): tokio `AsyncRead + AsyncWrite` transport
//!
//! ## Wire Unit
//!
//! ```text
//! [ciphertext len: u32 BE][IV (16)][AES-256-CBC( payload || ts u64 BE || HMAC (32) )]
//! ```
//!
//! Before reading a unit the receiver writes a 4-byte challenge. In echo
//! mode (the default) the sender reads it and binds it into the MAC, so a
//! captured unit cannot be replayed into a later `receive`.
//!
//! ## Security Notes
//!
//! - **Single failure class**: padding, length, MAC and freshness failures
//!   are all `ChannelError::VerificationFailed`.
//! - **Freshness**: `|receiver now - timestamp| <= freshness_window_ms`.
//! - **IVs and challenges**: drawn from the OS random source.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::{ChallengeMode, ChannelConfig};
pub use domain::envelope::{open_envelope, seal_envelope, ENVELOPE_OVERHEAD, TIMESTAMP_LEN};
pub use domain::errors::ChannelError;
pub use domain::freshness::is_fresh;
pub use domain::keys::ChannelKeys;
pub use ports::inbound::SecureChannelApi;
pub use ports::outbound::{Clock, SystemClock};
pub use service::SecureChannel;
