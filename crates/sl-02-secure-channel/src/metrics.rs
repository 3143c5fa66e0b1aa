//! # Channel Metrics
//!
//! Prometheus metrics for channel traffic.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! sl-02-secure-channel = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `channel_messages_sent_total` - Counter of messages sent
//! - `channel_messages_received_total` - Counter of messages accepted
//! - `channel_messages_rejected_total` - Counter of rejected frames (by reason)
//! - `channel_payload_bytes_total` - Counter of payload bytes (by direction)
//!
//! Rejections carry only the coarse error class, never which verification
//! check failed.

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total messages sent
    pub static ref MESSAGES_SENT: IntCounter = register_int_counter!(
        "channel_messages_sent_total",
        "Total number of channel messages sent"
    )
    .expect("Failed to create MESSAGES_SENT metric");

    /// Total messages received and verified
    pub static ref MESSAGES_RECEIVED: IntCounter = register_int_counter!(
        "channel_messages_received_total",
        "Total number of channel messages received and verified"
    )
    .expect("Failed to create MESSAGES_RECEIVED metric");

    /// Total frames rejected, labeled by reason
    pub static ref MESSAGES_REJECTED: IntCounterVec = register_int_counter_vec!(
        "channel_messages_rejected_total",
        "Total number of channel frames rejected",
        &["reason"]
    )
    .expect("Failed to create MESSAGES_REJECTED metric");

    /// Payload bytes, labeled by direction
    pub static ref PAYLOAD_BYTES: IntCounterVec = register_int_counter_vec!(
        "channel_payload_bytes_total",
        "Total payload bytes carried by the channel",
        &["direction"]
    )
    .expect("Failed to create PAYLOAD_BYTES metric");
}

/// Record a message sent
#[cfg(feature = "metrics")]
pub fn record_sent(payload_len: usize) {
    MESSAGES_SENT.inc();
    PAYLOAD_BYTES.with_label_values(&["sent"]).inc_by(payload_len as u64);
}

/// Record a message received
#[cfg(feature = "metrics")]
pub fn record_received(payload_len: usize) {
    MESSAGES_RECEIVED.inc();
    PAYLOAD_BYTES.with_label_values(&["received"]).inc_by(payload_len as u64);
}

/// Record a frame rejected with reason
#[cfg(feature = "metrics")]
pub fn record_rejected(reason: &str) {
    MESSAGES_REJECTED.with_label_values(&[reason]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_sent(_payload_len: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_received(_payload_len: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejected(_reason: &str) {}
