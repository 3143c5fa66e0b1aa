//! # Adapters Layer
//!
//! - `tokio_io`: async `send_async` / `receive_async` over tokio streams

pub mod tokio_io;
