//! # Link Telemetry
//!
//! Logging setup and metrics export shared by SecureLink services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use link_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Handshake and channel logs now reach the configured output.
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `securelink` | Service name in logs |
//! | `SL_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `SL_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `SL_JSON_LOGS` | `false` | JSON instead of pretty output |

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::encode_metrics;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to export metrics: {0}")]
    MetricsExport(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global tracing subscriber.
///
/// Call once per process. A second call returns
/// `TelemetryError::TracingInit` and leaves the first subscriber in place.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;
    Ok(TelemetryGuard {
        service: config.service_name.clone(),
    })
}

/// Guard held for the lifetime of the application. Logs shutdown on drop.
pub struct TelemetryGuard {
    service: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service, "Shutting down telemetry");
    }
}
