//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.

pub mod trust_store;

pub use trust_store::StaticTrustStore;
