use serde::{Deserialize, Serialize};

/// Face-mesh landmark in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// 0.0 - 1.0 across the frame width
    pub x: f32,
    /// 0.0 - 1.0 down the frame height
    pub y: f32,
    /// Relative depth, unused for classification
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Pixel position, truncated toward zero
    pub fn to_pixel(&self, width: u32, height: u32) -> (i32, i32) {
        (
            (f64::from(self.x) * f64::from(width)) as i32,
            (f64::from(self.y) * f64::from(height)) as i32,
        )
    }
}

/// All landmarks the mesh produced for one face, in mesh index order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub landmarks: Vec<Landmark>,
}

impl FaceLandmarks {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

/// One captured frame with the faces located in it
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Position in the capture sequence, starting at 0
    pub index: u64,
    pub width: u32,
    pub height: u32,
    pub faces: Vec<FaceLandmarks>,
}

impl Frame {
    pub fn new(index: u64, width: u32, height: u32, faces: Vec<FaceLandmarks>) -> Self {
        Self {
            index,
            width,
            height,
            faces,
        }
    }

    pub fn has_face(&self) -> bool {
        !self.faces.is_empty()
    }
}
