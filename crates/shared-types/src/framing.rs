//! # Binary Field Codec
//!
//! Every field is written as a 4-byte big-endian length followed by the
//! field's bytes. Decoding is strict: the buffer must contain exactly the
//! requested number of fields and nothing else.
//!
//! ```text
//! +----------+-----------+----------+-----------+ ...
//! | len0 u32 | field0    | len1 u32 | field1    |
//! +----------+-----------+----------+-----------+ ...
//! ```
//!
//! The same prefix is used for whole frames on a stream (`write_frame` /
//! `read_frame`).

use crate::errors::{FrameError, FramingError};
use std::io::{Read, Write};

/// Size of the big-endian length prefix in bytes.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Concatenate `fields` in order, each preceded by its 4-byte length.
///
/// # Errors
///
/// Returns `FramingError::FieldTooLarge` if any field is longer than
/// `u32::MAX` bytes.
pub fn encode_fields<T: AsRef<[u8]>>(fields: &[T]) -> Result<Vec<u8>, FramingError> {
    let total: usize = fields
        .iter()
        .map(|f| LENGTH_PREFIX_SIZE + f.as_ref().len())
        .sum();
    let mut out = Vec::with_capacity(total);

    for (index, field) in fields.iter().enumerate() {
        let bytes = field.as_ref();
        let len = u32::try_from(bytes.len()).map_err(|_| FramingError::FieldTooLarge {
            field: index,
            len: bytes.len(),
        })?;
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(bytes);
    }

    Ok(out)
}

/// Split `bytes` into exactly `expected_count` length-prefixed fields.
///
/// # Errors
///
/// - `FramingError::Truncated` if a length header or a declared field runs
///   past the end of the input.
/// - `FramingError::TrailingBytes` if input remains after the last field.
pub fn decode_fields(bytes: &[u8], expected_count: usize) -> Result<Vec<Vec<u8>>, FramingError> {
    let mut fields = Vec::with_capacity(expected_count);
    let mut rest = bytes;

    for index in 0..expected_count {
        if rest.len() < LENGTH_PREFIX_SIZE {
            return Err(FramingError::Truncated {
                field: index,
                needed: LENGTH_PREFIX_SIZE,
                available: rest.len(),
            });
        }
        let (header, tail) = rest.split_at(LENGTH_PREFIX_SIZE);
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        prefix.copy_from_slice(header);
        let len = u32::from_be_bytes(prefix) as usize;

        if tail.len() < len {
            return Err(FramingError::Truncated {
                field: index,
                needed: len,
                available: tail.len(),
            });
        }
        let (content, tail) = tail.split_at(len);
        fields.push(content.to_vec());
        rest = tail;
    }

    if !rest.is_empty() {
        return Err(FramingError::TrailingBytes {
            fields: expected_count,
            remaining: rest.len(),
        });
    }

    Ok(fields)
}

/// Write one length-prefixed frame and flush the writer.
///
/// # Errors
///
/// Returns `FrameError::TooLarge` if `payload` cannot be described by a
/// 4-byte length, or `FrameError::Io` if the writer fails.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<(), FrameError> {
    let len = u32::try_from(payload.len()).map_err(|_| FrameError::TooLarge {
        len: payload.len(),
        max: u32::MAX as usize,
    })?;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Read one length-prefixed frame of at most `max_len` bytes.
///
/// A stream that ends before the announced length has been read is reported
/// as `FrameError::Io` (`UnexpectedEof`); short reads are never tolerated.
///
/// # Errors
///
/// - `FrameError::Empty` for a zero-length frame.
/// - `FrameError::TooLarge` if the announced length exceeds `max_len`.
/// - `FrameError::Io` on any read failure.
pub fn read_frame<R: Read>(reader: &mut R, max_len: usize) -> Result<Vec<u8>, FrameError> {
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    reader.read_exact(&mut prefix)?;
    let len = u32::from_be_bytes(prefix) as usize;
    check_frame_len(len, max_len)?;

    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Validate an announced frame length against the configured ceiling.
///
/// Exposed so async transports apply the same rule as `read_frame`.
pub fn check_frame_len(len: usize, max_len: usize) -> Result<(), FrameError> {
    if len == 0 {
        return Err(FrameError::Empty);
    }
    if len > max_len {
        return Err(FrameError::TooLarge { len, max: max_len });
    }
    Ok(())
}
