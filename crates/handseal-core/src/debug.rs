//! Landmark and dwell-progress overlay, drawn under the effect when enabled.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::effect::anchor_to_surface;
use crate::landmarks::Hand;
use crate::pose::{PoseConfig, PoseDetection};
use crate::surface::{Path, Rgba, Surface};

const DOT_RADIUS: f32 = 3.0;
const TIP_RADIUS: f32 = 6.0;
const RING_RADIUS: f32 = 30.0;
const RING_WIDTH: f32 = 4.0;
const BAR_SIZE: Vec2 = Vec2::new(64.0, 6.0);
const BAR_GAP: f32 = 12.0;

const DOT_COLOR: Rgba = Rgba::rgb(235, 235, 235);
const TIP_COLOR: Rgba = Rgba::rgb(80, 220, 255);
const RING_TRACK: Rgba = Rgba::rgb(255, 255, 255);
const RING_COLOR: Rgba = Rgba::rgb(170, 80, 255);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugOverlay {
    /// Landmarks drawn highlighted.
    pub tips: [usize; 2],
    pub mirror: bool,
}

impl DebugOverlay {
    pub fn new(pose: &PoseConfig, mirror: bool) -> Self {
        Self {
            tips: [pose.fingers[0].tip, pose.fingers[1].tip],
            mirror,
        }
    }

    fn to_surface(&self, p: Vec2, size: Vec2) -> Vec2 {
        anchor_to_surface(p, size, self.mirror)
    }

    /// Draw every landmark, and while posed a charging ring around `anchor`
    /// (normalized) sweeping `progress` plus a confidence bar.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        hands: &[Hand],
        detection: &PoseDetection,
        anchor: Option<Vec2>,
        progress: f32,
    ) {
        let size = Vec2::new(surface.width(), surface.height());
        for hand in hands {
            for (i, p) in hand.landmarks.iter().enumerate() {
                let at = self.to_surface(p.truncate(), size);
                let (radius, color) = if self.tips.contains(&i) {
                    (TIP_RADIUS, TIP_COLOR)
                } else {
                    (DOT_RADIUS, DOT_COLOR.with_alpha(0.7))
                };
                surface.fill_path(&Path::new().circle(at, radius), color);
            }
        }

        let Some(anchor) = anchor.filter(|_| detection.detected) else {
            return;
        };
        let center = self.to_surface(anchor, size);
        surface.stroke_path(
            &Path::new().circle(center, RING_RADIUS),
            RING_TRACK.with_alpha(0.25),
            RING_WIDTH,
        );
        let progress = progress.clamp(0.0, 1.0);
        if progress > 0.0 {
            let start = -FRAC_PI_2;
            let arc = Path::new().arc(center, RING_RADIUS, start, start + TAU * progress);
            surface.stroke_path(&arc, RING_COLOR, RING_WIDTH);
        }

        let bar_origin = center + Vec2::new(-BAR_SIZE.x * 0.5, RING_RADIUS + BAR_GAP);
        surface.fill_rect(bar_origin, BAR_SIZE, Rgba::BLACK.with_alpha(0.5));
        let filled = Vec2::new(BAR_SIZE.x * detection.confidence.clamp(0.0, 1.0), BAR_SIZE.y);
        surface.fill_rect(bar_origin, filled, TIP_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::classify;
    use crate::surface::{DrawOp, PathOp, RecordingSurface};
    use crate::synth::{seal_at, seal_hand, HandShape};

    #[test]
    fn draws_a_dot_per_landmark_and_nothing_else_without_pose() {
        let hands = [
            seal_hand(HandShape::Open, Vec2::new(0.3, 0.8), 0.3),
            seal_hand(HandShape::Fist, Vec2::new(0.7, 0.8), 0.3),
        ];
        let overlay = DebugOverlay::new(&PoseConfig::default(), true);
        let mut s = RecordingSurface::new(640.0, 480.0);
        overlay.render(&mut s, &hands, &PoseDetection::NONE, Some(Vec2::splat(0.5)), 0.5);
        assert_eq!(s.ops.len(), 42);
        assert_eq!(s.count(|op| matches!(op, DrawOp::StrokePath { .. })), 0);
    }

    #[test]
    fn posed_hand_gets_ring_arc_and_bar() {
        let hand = seal_at(Vec2::new(0.25, 0.5), 0.3, 0.0);
        let cfg = PoseConfig::default();
        let det = classify(std::slice::from_ref(&hand), &cfg);
        assert!(det.detected);
        let overlay = DebugOverlay::new(&cfg, true);
        let mut s = RecordingSurface::new(800.0, 600.0);
        overlay.render(&mut s, &[hand], &det, det.anchor, 0.5);
        assert_eq!(s.count(|op| matches!(op, DrawOp::StrokePath { .. })), 2);
        assert_eq!(s.count(|op| matches!(op, DrawOp::FillRect { .. })), 2);
        // ring centred on the mirrored anchor
        let ring = s.ops.iter().find_map(|op| match op {
            DrawOp::StrokePath { path, .. } => path.ops().first().copied(),
            _ => None,
        });
        match ring {
            Some(PathOp::Arc { center, .. }) => {
                assert!((center - Vec2::new(600.0, 300.0)).length() < 1e-2);
            }
            other => panic!("unexpected ring {other:?}"),
        }
    }

    #[test]
    fn zero_progress_draws_only_the_track() {
        let hand = seal_at(Vec2::new(0.5, 0.5), 0.3, 0.0);
        let cfg = PoseConfig::default();
        let det = classify(std::slice::from_ref(&hand), &cfg);
        let mut s = RecordingSurface::new(800.0, 600.0);
        DebugOverlay::new(&cfg, false).render(&mut s, &[], &det, det.anchor, 0.0);
        assert_eq!(s.count(|op| matches!(op, DrawOp::StrokePath { .. })), 1);
    }
}
