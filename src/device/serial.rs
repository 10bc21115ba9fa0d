use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

use super::{CounterSink, DeviceError};
use crate::emotion::Counters;

/// Serial line settings
#[derive(Debug, Clone)]
pub struct SerialSinkConfig {
    pub port: String,
    pub baud_rate: u32,
    /// Wait after opening; boards that reset on connect drop bytes until ready
    pub settle_ms: u64,
}

impl Default for SerialSinkConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: 9600,
            settle_ms: 2000,
        }
    }
}

/// Format the counter line sent to the device
pub fn format_counter_line(counters: &Counters) -> String {
    format!("S:{},D:{}\n", counters.smile, counters.sad)
}

/// Writes counter lines to any byte stream, normally a serial port
pub struct SerialSink<W = Box<dyn serialport::SerialPort>> {
    writer: W,
    last_sent: Option<Counters>,
}

impl SerialSink {
    /// Open the configured port and wait for the device to settle
    pub fn open(config: &SerialSinkConfig) -> Result<Self, DeviceError> {
        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(Duration::from_secs(2))
            .open()
            .map_err(|e| DeviceError::Open {
                port: config.port.clone(),
                message: e.to_string(),
            })?;

        info!(
            "Counter device connected: {} at {} baud",
            config.port, config.baud_rate
        );

        if config.settle_ms > 0 {
            debug!("Waiting {}ms for device to settle", config.settle_ms);
            std::thread::sleep(Duration::from_millis(config.settle_ms));
        }

        Ok(Self::new(port))
    }
}

impl<W: Write> SerialSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_sent: None,
        }
    }

    pub fn last_sent(&self) -> Option<Counters> {
        self.last_sent
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CounterSink for SerialSink<W> {
    fn send(&mut self, counters: &Counters) -> Result<(), DeviceError> {
        let line = format_counter_line(counters);
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        self.last_sent = Some(*counters);
        Ok(())
    }
}

/// Sink used when no device is configured
#[derive(Debug, Default)]
pub struct NullSink;

impl CounterSink for NullSink {
    fn send(&mut self, _counters: &Counters) -> Result<(), DeviceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_counter_line() {
        let counters = Counters { smile: 3, sad: 12 };
        assert_eq!(format_counter_line(&counters), "S:3,D:12\n");
        assert_eq!(format_counter_line(&Counters::default()), "S:0,D:0\n");
    }

    #[test]
    fn test_serial_sink_writes_every_frame() {
        let mut sink = SerialSink::new(Vec::new());
        sink.send(&Counters { smile: 0, sad: 0 }).unwrap();
        sink.send(&Counters { smile: 1, sad: 0 }).unwrap();

        assert_eq!(sink.last_sent(), Some(Counters { smile: 1, sad: 0 }));
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "S:0,D:0\nS:1,D:0\n");
    }

    #[test]
    fn test_default_config_matches_device() {
        let config = SerialSinkConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.settle_ms, 2000);
    }

    #[test]
    fn test_open_missing_port_fails() {
        let config = SerialSinkConfig {
            port: "/dev/does-not-exist-emotion".to_string(),
            settle_ms: 0,
            ..Default::default()
        };
        assert!(matches!(SerialSink::open(&config), Err(DeviceError::Open { .. })));
    }

    #[test]
    fn test_null_sink_accepts_everything() {
        let mut sink = NullSink;
        assert!(sink.send(&Counters { smile: 9, sad: 9 }).is_ok());
    }
}
