//! # Handshake Subsystem (SL-01)
//!
//! Establishes mutual trust between two named parties and delivers a
//! session key for the secure channel.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Handshake message, field states, errors
//! - **Ports Layer** (`ports/`): Inbound `HandshakeApi`, outbound `TrustStore`
//! - **Adapters Layer** (`adapters/`): In-memory trust store
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Sign then seal**: the signature covers the plaintext session key and
//!   challenge, so tampered ciphertext or a swapped certificate fails
//!   verification after unsealing.
//! - **Issuer binding**: the service rejects a claimed issuer that is not
//!   the certificate subject unless explicitly configured otherwise.
//! - **Replay**: an `(issuer, challenge)` pair is accepted once per replay
//!   window.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::StaticTrustStore;
pub use config::HandshakeConfig;
pub use domain::entities::{EstablishedSession, OutboundHandshake};
pub use domain::errors::HandshakeError;
pub use domain::field_state::FieldState;
pub use domain::message::{HandshakeMessage, CHALLENGE_LEN, FIELD_COUNT};
pub use ports::inbound::HandshakeApi;
pub use ports::outbound::TrustStore;
pub use service::{HandshakeService, LocalCredentials};
