use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use super::{CaptureError, FaceLandmarks, Frame, FrameSource};

/// One line of a recording
#[derive(Debug, Deserialize)]
struct RecordedFrame {
    width: u32,
    height: u32,
    #[serde(default)]
    faces: Vec<FaceLandmarks>,
}

/// Replays frames recorded as JSON lines
///
/// Each non-blank line holds `{"width", "height", "faces": [{"landmarks": [...]}]}`.
/// The end of the file ends capture.
pub struct ReplaySource<R = BufReader<File>> {
    reader: R,
    label: String,
    line_number: usize,
    frames_read: u64,
    line_buf: String,
}

impl ReplaySource {
    /// Open a recording file
    pub fn open(path: &Path) -> Result<Self, CaptureError> {
        let file = File::open(path).map_err(|source| CaptureError::Open {
            path: path.display().to_string(),
            source,
        })?;
        info!("Replaying frames from {:?}", path);
        Ok(Self::from_reader(
            BufReader::new(file),
            path.display().to_string(),
        ))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R, label: String) -> Self {
        Self {
            reader,
            label,
            line_number: 0,
            frames_read: 0,
            line_buf: String::new(),
        }
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl<R: BufRead> FrameSource for ReplaySource<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
        loop {
            self.line_buf.clear();
            if self.reader.read_line(&mut self.line_buf)? == 0 {
                debug!("Replay exhausted after {} frames", self.frames_read);
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.line_buf.trim();
            if line.is_empty() {
                continue;
            }

            let recorded: RecordedFrame =
                serde_json::from_str(line).map_err(|e| CaptureError::Malformed {
                    line: self.line_number,
                    message: e.to_string(),
                })?;

            let frame = Frame::new(
                self.frames_read,
                recorded.width,
                recorded.height,
                recorded.faces,
            );
            self.frames_read += 1;
            return Ok(Some(frame));
        }
    }

    fn describe(&self) -> String {
        format!("replay:{}", self.label)
    }
}
