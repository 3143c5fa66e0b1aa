//! # Outbound Ports (Driven Ports / SPI)
//!
//! Freshness is always judged against the verifier's own clock. The
//! `Clock` port lives in `shared-types` so handshake and channel share one
//! notion of time.

pub use shared_types::{Clock, SystemClock};
