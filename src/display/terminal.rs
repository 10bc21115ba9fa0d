use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use tracing::debug;

use super::{Display, Overlay};

/// Renders the overlay as text and throttles the frame loop
///
/// Only prints when the overlay text changes, so a steady feed stays quiet.
/// Has no keyboard; the caller stops the loop through its stop flag.
pub struct TerminalDisplay<W = std::io::Stdout> {
    out: W,
    title: String,
    frame_delay: Duration,
    last_status: Option<String>,
}

impl TerminalDisplay {
    pub fn stdout(title: &str, frame_delay_ms: u64) -> Self {
        Self::new(std::io::stdout(), title, frame_delay_ms)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, title: &str, frame_delay_ms: u64) -> Self {
        Self {
            out,
            title: title.to_string(),
            frame_delay: Duration::from_millis(frame_delay_ms),
            last_status: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn show(&mut self, overlay: &Overlay) -> Result<Option<u8>> {
        let status = overlay.status_line();
        if self.last_status.as_deref() != Some(status.as_str()) {
            writeln!(self.out, "[{}] {}", self.title, status)
                .context("Failed to write overlay")?;
            self.out.flush().context("Failed to flush overlay")?;
            debug!(
                "Frame {}: {} marker(s) drawn",
                overlay.frame_index,
                overlay.markers.len()
            );
            self.last_status = Some(status);
        }

        if !self.frame_delay.is_zero() {
            std::thread::sleep(self.frame_delay);
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::{Classification, Counters, Emotion};

    fn overlay(smile: u64, current: Option<Emotion>) -> Overlay {
        Overlay::new(0, Counters { smile, sad: 0 }, current, &Classification::default())
    }

    #[test]
    fn test_prints_only_on_change() {
        let mut display = TerminalDisplay::new(Vec::new(), "Emotion Detection", 0);
        assert_eq!(display.show(&overlay(0, None)).unwrap(), None);
        assert_eq!(display.show(&overlay(0, None)).unwrap(), None);
        display.show(&overlay(0, Some(Emotion::Smile))).unwrap();
        display.show(&overlay(1, Some(Emotion::Smile))).unwrap();

        let text = String::from_utf8(display.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[Emotion Detection] Smile Count: 0 | Sad Count: 0");
        assert_eq!(
            lines[2],
            "[Emotion Detection] Smile Count: 1 | Sad Count: 0 | Emotion: SMILE"
        );
    }

    #[test]
    fn test_frame_delay_throttles() {
        let mut display = TerminalDisplay::new(Vec::new(), "t", 20);
        let start = std::time::Instant::now();
        display.show(&overlay(0, None)).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
