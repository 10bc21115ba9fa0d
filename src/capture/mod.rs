pub mod frame;
pub mod replay;

pub use frame::{FaceLandmarks, Frame, Landmark};
pub use replay::ReplaySource;

use thiserror::Error;

/// Errors raised while pulling frames from a source
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to open frame source {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read frame: {0}")]
    Read(#[from] std::io::Error),

    #[error("Malformed frame on line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Camera plus landmark collaborator
///
/// Yields frames with the faces already located. `Ok(None)` means capture
/// stopped producing frames and the caller should end its loop.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError>;

    /// Human-readable identifier for logs and the session record
    fn describe(&self) -> String;
}
