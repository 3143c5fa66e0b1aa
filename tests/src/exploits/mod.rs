//! # Attack Simulations
//!
//! Each test plays an attacker against a correctly configured peer and
//! asserts the attack is refused with the expected error.

pub mod channel_attacks;
pub mod handshake_attacks;
