//! # Shared Crypto - Link Security Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `keys` | RSA (PKCS#8 / SPKI) | Node identity keys |
//! | `sealing` | RSAES-OAEP-SHA256 | Session key and challenge transport |
//! | `signatures` | RSASSA-PKCS1-v1_5 + SHA-256 | Handshake authentication |
//! | `certificate` | X.509 v3 | Identity binding to keys |
//! | `symmetric` | AES-256-CBC + PKCS#7 | Channel encryption |
//! | `hashing` | SHA-256, HMAC-SHA256, HKDF | Channel integrity, key derivation |
//!
//! ## Security Properties
//!
//! - **OAEP**: randomized; a wrong key never yields plaintext
//! - **PKCS#1 v1.5 signatures**: deterministic, no RNG dependency
//! - **CBC**: fresh OS-random IV per message, no integrity of its own
//! - **HMAC verification**: constant-time tag comparison

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod certificate;
pub mod errors;
pub mod hashing;
pub mod keys;
pub mod random;
pub mod sealing;
pub mod signatures;
pub mod symmetric;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-exports
pub use certificate::Certificate;
pub use errors::CryptoError;
pub use hashing::{hkdf_sha256, hmac_sha256, sha256, verify_hmac_sha256, MAC_SIZE};
pub use keys::{RsaKeyPair, RsaPublicKey};
pub use random::{fill_random, random_bytes, random_u32};
pub use signatures::RsaSignature;
pub use symmetric::{decrypt, encrypt, Iv, SecretKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
