//! # Shared Types Crate
//!
//! Types and wire helpers used by both the handshake (`sl-01`) and the
//! secure channel (`sl-02`).
//!
//! ## Contents
//!
//! - **Framing** (`framing`): length-prefixed field codec and stream frames.
//! - **Entities** (`entities`): `Identity` and `SessionKey`.
//! - **Security** (`security`): wall clock port and the replay cache.
//!
//! ## Design Principles
//!
//! - **No crypto here**: everything in this crate is pure data handling, so
//!   the framing rules can be tested without keys.
//! - **Strict framing**: a buffer decodes only if it is consumed exactly.

pub mod entities;
pub mod errors;
pub mod framing;
pub mod security;

pub use entities::{Identity, SessionKey};
pub use errors::{FrameError, FramingError};
pub use framing::{
    check_frame_len, decode_fields, encode_fields, read_frame, write_frame, LENGTH_PREFIX_SIZE,
};
pub use security::{current_timestamp_millis, Clock, ReplayCache, SystemClock};
