use crate::emotion::{Classification, Counters, Emotion};

/// RGB color of an overlay element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const CYAN: Rgb = Rgb(0, 255, 255);

/// Radius in pixels of the mouth-corner markers
pub const MARKER_RADIUS: u32 = 2;

/// A line of text drawn at a fixed position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub origin: (i32, i32),
    pub color: Rgb,
}

/// Filled dot marking a landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub center: (i32, i32),
    pub radius: u32,
    pub color: Rgb,
}

/// Everything drawn on top of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub frame_index: u64,
    pub counters: Counters,
    pub current: Option<Emotion>,
    pub markers: Vec<Marker>,
}

impl Overlay {
    pub fn new(
        frame_index: u64,
        counters: Counters,
        current: Option<Emotion>,
        classification: &Classification,
    ) -> Self {
        let markers = classification
            .readings
            .iter()
            .flat_map(|r| [r.left, r.right])
            .map(|center| Marker {
                center,
                radius: MARKER_RADIUS,
                color: RED,
            })
            .collect();

        Self {
            frame_index,
            counters,
            current,
            markers,
        }
    }

    /// Text lines in draw order; the emotion line only appears while one is tracked
    pub fn text_lines(&self) -> Vec<TextLine> {
        let mut lines = vec![
            TextLine {
                text: format!("Smile Count: {}", self.counters.smile),
                origin: (20, 40),
                color: GREEN,
            },
            TextLine {
                text: format!("Sad Count: {}", self.counters.sad),
                origin: (20, 80),
                color: RED,
            },
        ];

        if let Some(emotion) = self.current {
            lines.push(TextLine {
                text: format!("Emotion: {}", emotion),
                origin: (20, 120),
                color: CYAN,
            });
        }

        lines
    }

    /// Single-line rendering of the text lines
    pub fn status_line(&self) -> String {
        self.text_lines()
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
