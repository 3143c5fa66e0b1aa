//! # Domain Layer
//!
//! Handshake message logic with no I/O dependencies.

pub mod entities;
pub mod errors;
pub mod field_state;
pub mod message;
