//! Hand landmark model as produced by the external estimator.
//!
//! Coordinates are normalized to the video frame: `x`, `y` in \[0, 1\] with the
//! origin at the top-left, `z` a relative depth.

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::LANDMARK_COUNT;
use crate::error::LandmarkError;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// Parse an estimator label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("left") {
            Some(Self::Left)
        } else if label.eq_ignore_ascii_case("right") {
            Some(Self::Right)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handedness {
    pub side: HandSide,
    pub score: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hand {
    pub landmarks: Vec<Vec3>,
    pub handedness: Option<Handedness>,
}

/// Hands reported for one video frame, in estimator order.
pub type Hands = SmallVec<[Hand; 2]>;

impl Hand {
    pub fn new(landmarks: Vec<Vec3>, handedness: Option<Handedness>) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }

    /// Build a hand from raw `[x, y, z]` triples, rejecting short or non-finite input.
    pub fn from_points(
        points: &[[f32; 3]],
        handedness: Option<Handedness>,
    ) -> Result<Self, LandmarkError> {
        if points.len() < LANDMARK_COUNT {
            return Err(LandmarkError::TooFewPoints {
                got: points.len(),
                need: LANDMARK_COUNT,
            });
        }
        if let Some(index) = points
            .iter()
            .position(|p| p.iter().any(|c| !c.is_finite()))
        {
            return Err(LandmarkError::NonFinite { index });
        }
        let landmarks = points.iter().map(|p| Vec3::from_array(*p)).collect();
        Ok(Self::new(landmarks, handedness))
    }

    #[inline]
    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.landmarks.get(index).copied()
    }

    pub fn side(&self) -> Option<HandSide> {
        self.handedness.map(|h| h.side)
    }
}
