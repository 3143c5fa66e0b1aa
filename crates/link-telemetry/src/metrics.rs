//! Prometheus text export.
//!
//! The handshake and channel crates register their counters in the default
//! Prometheus registry when built with their `metrics` feature; this module
//! renders whatever is registered there.

use prometheus::{Encoder, TextEncoder};

use crate::TelemetryError;

/// Encode all registered metrics in Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsExport(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsExport(e.to_string()))
}
