//! Geometric classifier for the two-finger seal.
//!
//! Stateless: every call looks only at the landmarks it is given. Frame-to-frame
//! caching lives in [`crate::frame_cache`], timing in [`crate::dwell`].

use glam::Vec2;

use crate::constants::{LANDMARK_COUNT, MIN_REFERENCE_DISTANCE, PROXIMITY_THRESHOLD};
use crate::landmarks::{Hand, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, WRIST};

/// Tip and proximal joint of one tracked finger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerJoints {
    pub tip: usize,
    pub pip: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PoseConfig {
    /// Normalized proximity below which the fingertips count as touching.
    pub threshold: f32,
    /// The two tracked fingers. The second finger's tip also anchors the
    /// wrist-to-tip reference distance.
    pub fingers: [FingerJoints; 2],
    /// How many hands must show the pose in the same frame.
    pub required_hands: usize,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            threshold: PROXIMITY_THRESHOLD,
            fingers: [
                FingerJoints {
                    tip: INDEX_TIP,
                    pip: INDEX_PIP,
                },
                FingerJoints {
                    tip: MIDDLE_TIP,
                    pip: MIDDLE_PIP,
                },
            ],
            required_hands: 1,
        }
    }
}

/// Classifier output for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PoseDetection {
    pub detected: bool,
    /// Midpoint of the two fingertips, normalized video coordinates.
    pub anchor: Option<Vec2>,
    /// 1 when the tips coincide, 0 at the threshold.
    pub confidence: f32,
    /// Normalized proximity of the firing hand.
    pub proximity: Option<f32>,
    /// Estimator-order index of the firing hand.
    pub hand_index: Option<usize>,
}

impl PoseDetection {
    pub const NONE: Self = Self {
        detected: false,
        anchor: None,
        confidence: 0.0,
        proximity: None,
        hand_index: None,
    };
}

/// Per-hand match.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    pub proximity: f32,
    pub confidence: f32,
    pub anchor: Vec2,
}

/// Scan hands in estimator order; the first qualifying hand wins.
pub fn classify(hands: &[Hand], cfg: &PoseConfig) -> PoseDetection {
    let required = cfg.required_hands.max(1);
    let mut first: Option<(usize, HandPose)> = None;
    let mut matched = 0usize;
    for (i, hand) in hands.iter().enumerate() {
        let Some(pose) = classify_hand(hand, cfg) else {
            continue;
        };
        matched += 1;
        if first.is_none() {
            first = Some((i, pose));
        }
        if matched >= required {
            break;
        }
    }
    match first {
        Some((i, pose)) if matched >= required => PoseDetection {
            detected: true,
            anchor: Some(pose.anchor),
            confidence: pose.confidence,
            proximity: Some(pose.proximity),
            hand_index: Some(i),
        },
        _ => PoseDetection::NONE,
    }
}

/// Evaluate a single hand against the pose predicate.
pub fn classify_hand(hand: &Hand, cfg: &PoseConfig) -> Option<HandPose> {
    let [a, b] = cfg.fingers;
    let proximity = normalized_proximity(hand, cfg)?;
    if proximity >= cfg.threshold {
        return None;
    }
    // y grows downwards: an extended finger has its tip above its proximal joint
    let a_tip = hand.point(a.tip)?;
    let b_tip = hand.point(b.tip)?;
    let a_extended = a_tip.y < hand.point(a.pip)?.y;
    let b_extended = b_tip.y < hand.point(b.pip)?.y;
    if !(a_extended && b_extended) {
        return None;
    }
    Some(HandPose {
        proximity,
        confidence: proximity_confidence(proximity, cfg.threshold),
        anchor: (a_tip.truncate() + b_tip.truncate()) * 0.5,
    })
}

/// Fingertip distance (3-D) over wrist-to-reference-tip distance (2-D).
///
/// `None` for short hands, non-finite coordinates or a collapsed reference.
pub fn normalized_proximity(hand: &Hand, cfg: &PoseConfig) -> Option<f32> {
    if hand.landmarks.len() < LANDMARK_COUNT {
        return None;
    }
    let [a, b] = cfg.fingers;
    let a_tip = hand.point(a.tip)?;
    let b_tip = hand.point(b.tip)?;
    let wrist = hand.point(WRIST)?;
    let d_tip = a_tip.distance(b_tip);
    let d_ref = wrist.truncate().distance(b_tip.truncate());
    if !d_ref.is_finite() || d_ref < MIN_REFERENCE_DISTANCE {
        return None;
    }
    let p = d_tip / d_ref;
    p.is_finite().then_some(p)
}

#[inline]
pub fn proximity_confidence(proximity: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (1.0 - proximity / threshold).clamp(0.0, 1.0)
}
