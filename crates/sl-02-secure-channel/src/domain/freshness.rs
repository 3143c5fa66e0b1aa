//! Message age check against the verifier's clock.

/// Whether `timestamp_ms` lies within `window_ms` of `now_ms`, in either
/// direction.
pub fn is_fresh(timestamp_ms: u64, now_ms: u64, window_ms: u64) -> bool {
    now_ms.abs_diff(timestamp_ms) <= window_ms
}
