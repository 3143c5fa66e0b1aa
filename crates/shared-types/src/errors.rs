//! # Error Types
//!
//! Framing errors shared by the handshake and channel crates.

use thiserror::Error;

/// Errors raised while encoding or decoding length-prefixed fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FramingError {
    /// Fewer bytes remain than a length header or declared length requires.
    #[error("Truncated field {field}: need {needed} bytes, {available} available")]
    Truncated {
        /// Zero-based index of the field being read.
        field: usize,
        /// Bytes required to finish the read.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
    },

    /// Input remained after all expected fields were read.
    #[error("Trailing bytes after {fields} fields: {remaining} unconsumed")]
    TrailingBytes {
        /// Number of fields that were decoded.
        fields: usize,
        /// Unconsumed byte count.
        remaining: usize,
    },

    /// A field is too long for a 4-byte length prefix.
    #[error("Field {field} too large to frame: {len} bytes")]
    FieldTooLarge {
        /// Zero-based index of the offending field.
        field: usize,
        /// Field length in bytes.
        len: usize,
    },
}

/// Errors raised while moving a length-prefixed frame over a byte stream.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Underlying stream failed, closed early, or returned a short read.
    #[error("Transport error: {0}")]
    Io(#[from] std::io::Error),

    /// Peer announced a frame larger than the configured ceiling.
    #[error("Frame too large: {len} bytes exceeds limit of {max}")]
    TooLarge {
        /// Announced length.
        len: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// Peer announced a zero-length frame.
    #[error("Empty frame")]
    Empty,
}
