//! Counter output to an external device.
//!
//! The device receives one ASCII line per frame, `S:<smile>,D:<sad>\n`.
//! Output is off unless a serial port is configured.

mod serial;

pub use serial::{format_counter_line, NullSink, SerialSink, SerialSinkConfig};

use thiserror::Error;

use crate::emotion::Counters;

/// Errors from the counter output device
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Failed to open serial port {port}: {message}")]
    Open { port: String, message: String },

    #[error("Failed to write counters: {0}")]
    Write(#[from] std::io::Error),
}

/// Receives the running counters once per frame
pub trait CounterSink {
    fn send(&mut self, counters: &Counters) -> Result<(), DeviceError>;
}
