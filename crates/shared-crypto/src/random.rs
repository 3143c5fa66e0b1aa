//! OS-backed randomness for keys, challenges and IVs.

use rand::{rngs::OsRng, RngCore};

/// Uniform 32-bit value, used for challenge nonces.
pub fn random_u32() -> u32 {
    OsRng.next_u32()
}

/// `len` random bytes.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Fill `buf` with random bytes.
pub fn fill_random(buf: &mut [u8]) {
    OsRng.fill_bytes(buf);
}
