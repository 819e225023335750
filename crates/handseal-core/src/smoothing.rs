//! Exponential smoothing of the tracked anchor for display centering.

use glam::Vec2;

use crate::easing::approach_vec2;

#[derive(Clone, Debug)]
pub struct AnchorSmoother {
    factor: f32,
    value: Option<Vec2>,
}

impl AnchorSmoother {
    /// `factor` in (0, 1]; 1 disables smoothing.
    pub fn new(factor: f32) -> Self {
        Self {
            factor: factor.clamp(f32::EPSILON, 1.0),
            value: None,
        }
    }

    /// Feed the latest anchor. The first sample after a gap is taken as-is;
    /// `None` forgets the history.
    pub fn update(&mut self, target: Option<Vec2>) -> Option<Vec2> {
        self.value = match (self.value, target) {
            (_, None) => None,
            (None, Some(t)) => Some(t),
            (Some(v), Some(t)) => Some(approach_vec2(v, t, self.factor)),
        };
        self.value
    }

    pub fn value(&self) -> Option<Vec2> {
        self.value
    }
}
