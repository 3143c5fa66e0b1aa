//! # Domain Layer
//!
//! Envelope sealing and opening, key handling and the freshness rule.
//! No I/O happens here.

pub mod envelope;
pub mod errors;
pub mod freshness;
pub mod keys;
