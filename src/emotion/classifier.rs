use tracing::trace;

use super::Emotion;
use crate::capture::{FaceLandmarks, Frame};

/// Face-mesh index of the mouth corner on the subject's left
pub const MOUTH_LEFT: usize = 306;
/// Face-mesh index of the mouth corner on the subject's right
pub const MOUTH_RIGHT: usize = 61;

/// Mouth width in pixels above which the face reads as smiling
const SMILE_MIN_PX: f64 = 60.0;
/// Mouth width in pixels below which the face reads as sad
const SAD_MAX_PX: f64 = 56.0;

/// Mouth measurement for one face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthReading {
    pub left: (i32, i32),
    pub right: (i32, i32),
    pub distance: f64,
    pub label: Option<Emotion>,
}

/// Raw per-frame classification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub label: Option<Emotion>,
    /// One entry per face that carried both mouth corners
    pub readings: Vec<MouthReading>,
}

/// Pixel positions of the two mouth corners, if the face has them
pub fn mouth_corners(
    face: &FaceLandmarks,
    width: u32,
    height: u32,
) -> Option<((i32, i32), (i32, i32))> {
    let left = face.get(MOUTH_LEFT)?.to_pixel(width, height);
    let right = face.get(MOUTH_RIGHT)?.to_pixel(width, height);
    Some((left, right))
}

fn label_for_width(distance: f64) -> Option<Emotion> {
    if distance > SMILE_MIN_PX {
        Some(Emotion::Smile)
    } else if distance < SAD_MAX_PX {
        Some(Emotion::Sad)
    } else {
        None
    }
}

fn read_mouth(face: &FaceLandmarks, width: u32, height: u32) -> Option<MouthReading> {
    let (left, right) = mouth_corners(face, width, height)?;
    let dx = f64::from(right.0 - left.0);
    let dy = f64::from(right.1 - left.1);
    let distance = (dx * dx + dy * dy).sqrt();

    Some(MouthReading {
        left,
        right,
        distance,
        label: label_for_width(distance),
    })
}

/// Classify every face in the frame by mouth width
///
/// Faces are visited in order and a later face only replaces the label when
/// it classifies, so a face in the dead band keeps an earlier face's label.
pub fn classify_faces(frame: &Frame) -> Classification {
    let mut classification = Classification::default();

    for face in &frame.faces {
        let Some(reading) = read_mouth(face, frame.width, frame.height) else {
            trace!("Frame {}: face without mouth corners skipped", frame.index);
            continue;
        };

        trace!(
            "Frame {}: mouth width {:.1}px -> {:?}",
            frame.index,
            reading.distance,
            reading.label
        );

        if reading.label.is_some() {
            classification.label = reading.label;
        }
        classification.readings.push(reading);
    }

    classification
}
