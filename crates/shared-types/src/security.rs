//! # Freshness and Replay Helpers
//!
//! Wall-clock access for timestamp freshness checks and a bounded cache of
//! recently seen nonces.
//!
//! ## Security Properties
//!
//! - **Verifier time**: freshness is always judged against the clock of the
//!   party doing the verification, never against the message itself.
//! - **Bounded memory**: the replay cache evicts expired entries and never
//!   grows beyond its configured capacity.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Default capacity of a replay cache before forced cleanup.
pub const MAX_REPLAY_CACHE_SIZE: usize = 100_000;

// =============================================================================
// CLOCK
// =============================================================================

/// Source of the current Unix time in milliseconds.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// The operating system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        current_timestamp_millis()
    }
}

/// Returns the current Unix timestamp in milliseconds.
///
/// A system clock set before the epoch yields 0 rather than panicking.
pub fn current_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// =============================================================================
// REPLAY CACHE
// =============================================================================

/// Thread-safe set of recently seen keys, each remembered for `ttl`.
///
/// ```rust,ignore
/// let cache = ReplayCache::new(Duration::from_secs(120));
///
/// assert!(cache.check_and_insert(("alice".to_string(), 7)));
/// assert!(!cache.check_and_insert(("alice".to_string(), 7))); // replay
/// ```
#[derive(Debug)]
pub struct ReplayCache<K: Eq + Hash + Clone> {
    entries: Mutex<HashMap<K, Instant>>,
    ttl: Duration,
    capacity: usize,
}

impl<K: Eq + Hash + Clone> ReplayCache<K> {
    /// Creates an empty cache remembering keys for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, MAX_REPLAY_CACHE_SIZE)
    }

    /// Creates an empty cache with an explicit capacity bound.
    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Records `key` and reports whether it was fresh.
    ///
    /// Returns `true` the first time a key is seen within the TTL and
    /// `false` for a replay.
    pub fn check_and_insert(&self, key: K) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        if entries.len() >= self.capacity {
            entries.retain(|_, expiry| *expiry > now);
        }

        if let Some(expiry) = entries.get(&key) {
            if *expiry > now {
                return false;
            }
        }

        if entries.len() >= self.capacity {
            // Still full of live entries: drop the one closest to expiry.
            let oldest = entries
                .iter()
                .min_by_key(|(_, expiry)| **expiry)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                tracing::warn!(capacity = self.capacity, "replay cache full, evicted oldest entry");
            }
        }

        entries.insert(key, now + self.ttl);
        true
    }

    /// Number of cached keys (including not yet evicted expired ones).
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every key.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
