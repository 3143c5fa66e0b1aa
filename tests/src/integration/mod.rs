//! # Integration Tests
//!
//! Full handshake (SL-01) feeding keys to the secure channel (SL-02), over
//! real loopback sockets.

pub mod channel_flow;
pub mod handshake_flow;
