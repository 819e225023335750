//! Radial burst lines sprayed from the trigger point.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::surface::{Path, Rgba, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstLayer {
    /// Drawn beneath the ink.
    Background,
    /// Drawn above the ink, beneath the text.
    Foreground,
}

/// One row of the burst table: how a batch of lines is randomized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstLayerSpec {
    pub layer: BurstLayer,
    pub count: usize,
    pub width: (f32, f32),
    /// Length added per update, px.
    pub growth: (f32, f32),
    /// Target length as a fraction of the surface diagonal.
    pub length_frac: (f32, f32),
    pub delay_ms: (f64, f64),
    /// Opacity lost per update once fully grown.
    pub decay: f32,
    pub color: [u8; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct BurstLine {
    pub angle: f32,
    pub current_length: f32,
    pub target_length: f32,
    pub width: f32,
    pub opacity: f32,
    pub growth_rate: f32,
    pub decay: f32,
    pub spawn_delay_ms: f64,
    pub spawn_time_ms: f64,
    pub layer: BurstLayer,
    pub color: Rgba,
}

impl BurstLine {
    #[inline]
    pub fn is_live(&self, now_ms: f64) -> bool {
        now_ms - self.spawn_time_ms >= self.spawn_delay_ms
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Start and end of the line's spine for a given origin.
    pub fn segment(&self, origin: Vec2) -> (Vec2, Vec2) {
        (origin, origin + self.direction() * self.current_length)
    }

    /// Advance one update. Returns `false` once the line has faded out.
    pub fn step(&mut self, now_ms: f64) -> bool {
        if !self.is_live(now_ms) {
            return true;
        }
        if self.current_length < self.target_length {
            self.current_length = (self.current_length + self.growth_rate).min(self.target_length);
        } else {
            self.opacity -= self.decay;
        }
        self.opacity > 0.0
    }

    /// Tapered wedge: full width at the origin, a point at the tip.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, origin: Vec2) {
        if self.current_length <= 0.0 || self.opacity <= 0.0 {
            return;
        }
        let (start, tip) = self.segment(origin);
        let half = self.direction().perp() * (self.width * 0.5);
        let path = Path::polygon(&[start + half, tip, start - half]);
        surface.fill_path(&path, self.color.with_alpha(self.opacity));
    }
}

/// Spread `spec.count` lines evenly around the circle with per-line jitter.
pub fn spawn_layer<R: Rng>(
    spec: &BurstLayerSpec,
    rng: &mut R,
    diagonal: f32,
    now_ms: f64,
    out: &mut Vec<BurstLine>,
) {
    if spec.count == 0 {
        return;
    }
    let spacing = TAU / spec.count as f32;
    let phase = rng.gen_range(0.0..spacing);
    out.reserve(spec.count);
    for i in 0..spec.count {
        let jitter = rng.gen_range(-0.4..0.4) * spacing;
        out.push(BurstLine {
            angle: phase + i as f32 * spacing + jitter,
            current_length: 0.0,
            target_length: diagonal * range_f32(rng, spec.length_frac),
            width: range_f32(rng, spec.width),
            opacity: rng.gen_range(0.75..=1.0),
            growth_rate: range_f32(rng, spec.growth),
            decay: spec.decay,
            spawn_delay_ms: range_f64(rng, spec.delay_ms),
            spawn_time_ms: now_ms,
            layer: spec.layer,
            color: Rgba::from_array(spec.color),
        });
    }
}

#[inline]
pub(crate) fn range_f32<R: Rng>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[inline]
pub(crate) fn range_f64<R: Rng>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line(delay: f64) -> BurstLine {
        BurstLine {
            angle: 0.0,
            current_length: 0.0,
            target_length: 25.0,
            width: 4.0,
            opacity: 1.0,
            growth_rate: 10.0,
            decay: 0.5,
            spawn_delay_ms: delay,
            spawn_time_ms: 0.0,
            layer: BurstLayer::Foreground,
            color: Rgba::WHITE,
        }
    }

    #[test]
    fn waits_for_delay_then_grows_then_fades() {
        let mut l = line(50.0);
        assert!(l.step(10.0));
        assert_eq!(l.current_length, 0.0);
        assert!(l.step(50.0));
        assert_eq!(l.current_length, 10.0);
        l.step(60.0);
        l.step(70.0);
        assert_eq!(l.current_length, 25.0);
        assert_eq!(l.opacity, 1.0);
        assert!(l.step(80.0));
        assert_eq!(l.opacity, 0.5);
        assert!(!l.step(90.0));
    }

    #[test]
    fn layer_spawns_requested_count_within_ranges() {
        let spec = crate::constants::BURST_LAYERS[1];
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = Vec::new();
        spawn_layer(&spec, &mut rng, 1000.0, 42.0, &mut out);
        assert_eq!(out.len(), spec.count);
        for l in &out {
            assert_eq!(l.layer, spec.layer);
            assert_eq!(l.spawn_time_ms, 42.0);
            assert!(l.width >= spec.width.0 && l.width <= spec.width.1);
            assert!(l.target_length >= 1000.0 * spec.length_frac.0);
            assert!(l.target_length <= 1000.0 * spec.length_frac.1);
            assert!(l.spawn_delay_ms >= spec.delay_ms.0 && l.spawn_delay_ms <= spec.delay_ms.1);
        }
    }

    #[test]
    fn wedge_starts_at_origin() {
        let mut l = line(0.0);
        l.current_length = 20.0;
        let mut s = crate::surface::RecordingSurface::new(100.0, 100.0);
        let origin = Vec2::new(30.0, 40.0);
        l.draw(&mut s, origin);
        assert_eq!(s.ops.len(), 1);
        assert_eq!(l.segment(origin), (origin, Vec2::new(50.0, 40.0)));
    }
}
