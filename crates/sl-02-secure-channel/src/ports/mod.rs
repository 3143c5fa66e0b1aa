//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that connection handlers use
//! - **Outbound (Driven)**: the wall clock freshness is measured against

pub mod inbound;
pub mod outbound;
