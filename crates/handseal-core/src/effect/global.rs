//! Episode-wide scalars: flash, screen shake and the vignette gate.

use glam::Vec2;
use rand::Rng;

use crate::constants::*;
use crate::surface::{Rgba, Surface};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobalEffect {
    pub flash_opacity: f32,
    pub shake_intensity: f32,
    pub shake_offset: Vec2,
    pub effect_start_ms: Option<f64>,
    pub is_active: bool,
}

impl GlobalEffect {
    pub fn start(&mut self, now_ms: f64) {
        *self = Self {
            flash_opacity: 1.0,
            shake_intensity: SHAKE_INITIAL,
            shake_offset: Vec2::ZERO,
            effect_start_ms: Some(now_ms),
            is_active: true,
        };
    }

    /// Milliseconds since the episode started, 0 when idle.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        self.effect_start_ms.map_or(0.0, |t| now_ms - t)
    }

    /// Whether flash or shake still has anything to show.
    pub fn is_settled(&self) -> bool {
        self.flash_opacity <= 0.0 && self.shake_intensity <= 0.0 && self.shake_offset == Vec2::ZERO
    }

    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        if self.flash_opacity > 0.0 {
            self.flash_opacity *= FLASH_DECAY;
            if self.flash_opacity < FLASH_FLOOR {
                self.flash_opacity = 0.0;
            }
        }
        if self.shake_intensity > SHAKE_NOISE_FLOOR {
            let s = self.shake_intensity;
            self.shake_offset = Vec2::new(rng.gen_range(-s..=s), rng.gen_range(-s..=s));
            self.shake_intensity *= SHAKE_DECAY;
        } else {
            self.shake_intensity = 0.0;
            self.shake_offset = Vec2::ZERO;
        }
    }

    pub fn finish(&mut self) {
        self.is_active = false;
        self.effect_start_ms = None;
    }

    pub fn draw_flash<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.flash_opacity <= 0.0 {
            return;
        }
        let size = Vec2::new(surface.width(), surface.height());
        // overscan so shake never exposes an unflashed edge
        let pad = Vec2::splat(SHAKE_INITIAL);
        surface.fill_rect(-pad, size + pad * 2.0, Rgba::WHITE.with_alpha(self.flash_opacity));
    }

    pub fn draw_vignette<S: Surface + ?Sized>(&self, surface: &mut S) {
        if !self.is_active {
            return;
        }
        let size = Vec2::new(surface.width(), surface.height());
        let half_diag = size.length() * 0.5;
        surface.fill_radial_gradient(
            size * 0.5,
            half_diag * VIGNETTE_INNER_FRAC,
            half_diag,
            &[
                (0.0, Rgba::TRANSPARENT),
                (1.0, Rgba::BLACK.with_alpha(VIGNETTE_EDGE_ALPHA)),
            ],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn flash_and_shake_decay_geometrically_then_snap() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut g = GlobalEffect::default();
        g.start(100.0);
        g.step(&mut rng);
        assert!((g.flash_opacity - FLASH_DECAY).abs() < 1e-6);
        assert!((g.shake_intensity - SHAKE_INITIAL * SHAKE_DECAY).abs() < 1e-4);
        assert!(g.shake_offset.x.abs() <= SHAKE_INITIAL);
        for _ in 0..200 {
            g.step(&mut rng);
        }
        assert_eq!(g.flash_opacity, 0.0);
        assert_eq!(g.shake_offset, Vec2::ZERO);
        assert!(g.is_settled());
        assert!(g.is_active);
    }

    #[test]
    fn vignette_only_while_active() {
        let mut g = GlobalEffect::default();
        let mut s = RecordingSurface::new(1000.0, 800.0);
        g.draw_vignette(&mut s);
        assert!(s.ops.is_empty());
        g.start(0.0);
        g.draw_vignette(&mut s);
        match &s.ops[0] {
            DrawOp::RadialGradient {
                center,
                inner_radius,
                outer_radius,
                ..
            } => {
                assert_eq!(*center, Vec2::new(500.0, 400.0));
                assert!((*inner_radius - *outer_radius * VIGNETTE_INNER_FRAC).abs() < 1e-3);
            }
            other => panic!("unexpected op {other:?}"),
        }
        g.finish();
        s.clear();
        g.draw_vignette(&mut s);
        assert!(s.ops.is_empty());
        assert_eq!(g.elapsed_ms(5000.0), 0.0);
    }
}
