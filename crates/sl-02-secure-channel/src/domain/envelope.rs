//! # Message Envelope
//!
//! Pure transformation between a payload and the ciphertext carried in one
//! channel frame.
//!
//! ## Plaintext Layout (before encryption)
//!
//! ```text
//! [payload (n)][timestamp: u64 BE unix ms (8)][HMAC-SHA256 (32)]
//! ```
//!
//! The MAC covers `challenge || payload || timestamp`, where `challenge` is
//! the receiver's 4-byte challenge when it is bound and empty otherwise.
//! The challenge itself is never transmitted inside the envelope.
//!
//! ## Ciphertext
//!
//! `IV (16) || AES-256-CBC/PKCS#7 blocks`

use crate::domain::errors::ChannelError;
use crate::domain::freshness::is_fresh;
use crate::domain::keys::ChannelKeys;
use shared_crypto::symmetric::IV_SIZE;
use shared_crypto::{decrypt, encrypt, hmac_sha256, verify_hmac_sha256, MAC_SIZE};
use zeroize::Zeroize;

/// Timestamp width in bytes.
pub const TIMESTAMP_LEN: usize = 8;

/// Receiver challenge width in bytes.
pub const CHALLENGE_LEN: usize = 4;

/// Bytes added to the payload before encryption.
pub const ENVELOPE_OVERHEAD: usize = TIMESTAMP_LEN + MAC_SIZE;

/// Timestamp, authenticate and encrypt `payload`.
///
/// # Errors
///
/// Returns `ChannelError::Crypto` if a primitive fails; nothing is sent.
pub fn seal_envelope(
    keys: &ChannelKeys,
    payload: &[u8],
    timestamp_ms: u64,
    challenge: Option<&[u8; CHALLENGE_LEN]>,
) -> Result<Vec<u8>, ChannelError> {
    let timestamp = timestamp_ms.to_be_bytes();
    let bound = bound_challenge(challenge);
    let mac = hmac_sha256(keys.auth_key(), &[bound, payload, &timestamp])?;

    let mut plaintext = Vec::with_capacity(payload.len() + ENVELOPE_OVERHEAD);
    plaintext.extend_from_slice(payload);
    plaintext.extend_from_slice(&timestamp);
    plaintext.extend_from_slice(&mac);

    let result = encrypt(keys.enc_key(), &plaintext);
    plaintext.zeroize();
    Ok(result?)
}

/// Decrypt `ciphertext`, check its MAC and its age, and return the payload.
///
/// # Errors
///
/// Returns `ChannelError::VerificationFailed` for every failure: bad
/// padding, a plaintext too short to hold a timestamp and MAC, a MAC
/// mismatch, or a timestamp outside `window_ms` of `now_ms`.
pub fn open_envelope(
    keys: &ChannelKeys,
    ciphertext: &[u8],
    challenge: Option<&[u8; CHALLENGE_LEN]>,
    now_ms: u64,
    window_ms: u64,
) -> Result<Vec<u8>, ChannelError> {
    let (mut plaintext, decrypted) = plaintext_or_decoy(keys, ciphertext);

    let payload_len = plaintext.len() - ENVELOPE_OVERHEAD;
    let (payload, rest) = plaintext.split_at(payload_len);
    let (timestamp, mac) = rest.split_at(TIMESTAMP_LEN);

    let bound = bound_challenge(challenge);
    let mac_ok = verify_hmac_sha256(keys.auth_key(), &[bound, payload, timestamp], mac);

    let mut ts = [0u8; TIMESTAMP_LEN];
    ts.copy_from_slice(timestamp);
    let fresh = is_fresh(u64::from_be_bytes(ts), now_ms, window_ms);

    // Decryption, MAC and freshness are all evaluated for every input.
    if decrypted & mac_ok & fresh {
        plaintext.truncate(payload_len);
        Ok(plaintext)
    } else {
        plaintext.zeroize();
        Err(ChannelError::VerificationFailed)
    }
}

/// Decrypted plaintext and `true`, or a zeroed stand-in sized like the
/// ciphertext body and `false` when decryption fails or the plaintext
/// cannot hold a timestamp and MAC. The result is never shorter than
/// `ENVELOPE_OVERHEAD`, so the MAC is always computed over it.
fn plaintext_or_decoy(keys: &ChannelKeys, ciphertext: &[u8]) -> (Vec<u8>, bool) {
    match decrypt(keys.enc_key(), ciphertext) {
        Ok(plaintext) if plaintext.len() >= ENVELOPE_OVERHEAD => (plaintext, true),
        Ok(mut short) => {
            short.zeroize();
            (decoy(ciphertext.len()), false)
        }
        Err(_) => (decoy(ciphertext.len()), false),
    }
}

fn decoy(ciphertext_len: usize) -> Vec<u8> {
    vec![0u8; ciphertext_len.saturating_sub(IV_SIZE).max(ENVELOPE_OVERHEAD)]
}

fn bound_challenge(challenge: Option<&[u8; CHALLENGE_LEN]>) -> &[u8] {
    match challenge {
        Some(c) => c,
        None => &[],
    }
}
