//! Expression classification and episode counting.
//!
//! The classifier maps one frame's face landmarks to a raw label; the
//! stability filter turns the noisy per-frame labels into counted episodes.

mod classifier;
mod stability;

use serde::{Deserialize, Serialize};

pub use classifier::{classify_faces, mouth_corners, Classification, MouthReading};
pub use stability::{Counters, StabilityFilter, StabilityUpdate, MIN_FRAMES};

/// A countable facial expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Emotion {
    Smile,
    Sad,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Smile => "SMILE",
            Emotion::Sad => "SAD",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
