use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::emotion::{Counters, Emotion};

/// A sustained expression that reached the threshold and was counted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeEvent {
    pub id: Uuid,
    pub emotion: Emotion,
    /// Frame on which the episode was counted
    pub frame_index: u64,
    pub counted_at: DateTime<Utc>,
}

impl EpisodeEvent {
    pub fn new(emotion: Emotion, frame_index: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            emotion,
            frame_index,
            counted_at: Utc::now(),
        }
    }
}

/// Why the frame loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The source stopped producing frames
    CaptureEnded,
    /// ESC pressed in the display
    EscapePressed,
    /// Stop flag set, e.g. by Ctrl+C
    Interrupted,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::CaptureEnded => "capture ended",
            StopReason::EscapePressed => "escape pressed",
            StopReason::Interrupted => "interrupted",
        }
    }
}

/// In-memory record of one run; dropped at exit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub frames_processed: u64,
    /// Frames where at least one face was present
    pub frames_with_face: u64,
    pub episodes: Vec<EpisodeEvent>,
    pub counters: Counters,
    pub stop_reason: Option<StopReason>,
}

impl SessionRecord {
    pub fn new(source: String) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            source,
            started_at: Utc::now(),
            ended_at: None,
            frames_processed: 0,
            frames_with_face: 0,
            episodes: Vec::new(),
            counters: Counters::default(),
            stop_reason: None,
        }
    }

    pub fn record_frame(&mut self, has_face: bool) {
        self.frames_processed += 1;
        if has_face {
            self.frames_with_face += 1;
        }
    }

    pub fn add_episode(&mut self, episode: EpisodeEvent) {
        self.episodes.push(episode);
    }

    pub fn finalize(&mut self, counters: Counters, reason: StopReason) {
        self.counters = counters;
        self.stop_reason = Some(reason);
        self.ended_at = Some(Utc::now());
    }

    pub fn duration_ms(&self) -> u64 {
        let end = self.ended_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_milliseconds().max(0) as u64
    }

    pub fn episodes_of(&self, emotion: Emotion) -> impl Iterator<Item = &EpisodeEvent> {
        self.episodes.iter().filter(move |e| e.emotion == emotion)
    }

    /// Multi-line summary printed at exit
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Source: {}", self.source),
            format!("Duration: {:.1}s", self.duration_ms() as f64 / 1000.0),
            format!(
                "Frames: {} ({} with a face)",
                self.frames_processed, self.frames_with_face
            ),
            format!("Smiles: {}", self.counters.smile),
            format!("Sad: {}", self.counters.sad),
        ];
        if let Some(reason) = self.stop_reason {
            lines.push(format!("Stopped: {}", reason.as_str()));
        }
        lines.join("\n")
    }
}
