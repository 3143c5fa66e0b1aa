//! # Handshake Metrics
//!
//! Prometheus metrics for handshake volume and rejections.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! sl-01-handshake = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `handshake_initiated_total` - Counter of handshakes built
//! - `handshake_accepted_total` - Counter of handshakes verified
//! - `handshake_rejected_total` - Counter of rejected handshakes (by reason)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total handshakes initiated
    pub static ref HANDSHAKES_INITIATED: IntCounter = register_int_counter!(
        "handshake_initiated_total",
        "Total number of handshakes built and sealed"
    )
    .expect("Failed to create HANDSHAKES_INITIATED metric");

    /// Total handshakes accepted
    pub static ref HANDSHAKES_ACCEPTED: IntCounter = register_int_counter!(
        "handshake_accepted_total",
        "Total number of handshakes accepted"
    )
    .expect("Failed to create HANDSHAKES_ACCEPTED metric");

    /// Total handshakes rejected, labeled by reason
    pub static ref HANDSHAKES_REJECTED: IntCounterVec = register_int_counter_vec!(
        "handshake_rejected_total",
        "Total number of handshakes rejected",
        &["reason"]
    )
    .expect("Failed to create HANDSHAKES_REJECTED metric");
}

/// Record a handshake built
#[cfg(feature = "metrics")]
pub fn record_initiated() {
    HANDSHAKES_INITIATED.inc();
}

/// Record a handshake accepted
#[cfg(feature = "metrics")]
pub fn record_accepted() {
    HANDSHAKES_ACCEPTED.inc();
}

/// Record a handshake rejected with reason
#[cfg(feature = "metrics")]
pub fn record_rejected(reason: &str) {
    HANDSHAKES_REJECTED.with_label_values(&[reason]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_initiated() {}

#[cfg(not(feature = "metrics"))]
pub fn record_accepted() {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejected(_reason: &str) {}
