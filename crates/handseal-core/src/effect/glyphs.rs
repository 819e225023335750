//! Staggered per-character text reveal.
//!
//! Each character flies in from a scattered, enlarged, tilted start towards
//! its laid-out slot. The blend factor ramps up along a cubic ease-out over
//! the reveal window, so glyphs snap in quickly and settle softly.

use glam::Vec2;
use rand::Rng;

use crate::constants::*;
use crate::easing::{approach, approach_vec2, ease_out_cubic, lerp};
use crate::surface::{Rgba, Surface, TextStyle};

const GLYPH_FILL: Rgba = Rgba::rgb(250, 246, 255);
const GLYPH_OUTLINE: Rgba = Rgba::rgb(8, 6, 14);
const GLYPH_GLOW: Rgba = Rgba::rgb(150, 70, 255);

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingGlyph {
    pub character: char,
    pub current_pos: Vec2,
    pub target_pos: Vec2,
    pub opacity: f32,
    pub scale: f32,
    pub target_scale: f32,
    pub rotation: f32,
    pub target_rotation: f32,
    pub reveal_delay_ms: f64,
    pub spawn_time_ms: f64,
    pub group: usize,
    pub font_px: f32,
}

impl FloatingGlyph {
    #[inline]
    pub fn is_revealed(&self, now_ms: f64) -> bool {
        now_ms - self.spawn_time_ms >= self.reveal_delay_ms
    }

    /// Progress through the reveal window, 0 before it starts.
    pub fn reveal_progress(&self, now_ms: f64) -> f32 {
        let t = (now_ms - self.spawn_time_ms - self.reveal_delay_ms) / GLYPH_REVEAL_WINDOW_MS;
        t.clamp(0.0, 1.0) as f32
    }

    /// Advance one update. While `fading`, opacity only goes down.
    /// Returns `false` once the glyph is fully faded.
    pub fn step(&mut self, now_ms: f64, fading: bool) -> bool {
        let revealed = self.is_revealed(now_ms);
        if revealed {
            let eased = ease_out_cubic(self.reveal_progress(now_ms));
            let k = lerp(GLYPH_BLEND_MIN, GLYPH_BLEND_MAX, eased);
            self.current_pos = approach_vec2(self.current_pos, self.target_pos, k);
            self.scale = approach(self.scale, self.target_scale, k);
            self.rotation = approach(self.rotation, self.target_rotation, k);
            if !fading {
                self.opacity = approach(self.opacity, 1.0, k);
            }
        }
        if fading {
            self.opacity = (self.opacity - GLYPH_FADE_STEP).max(0.0);
            return self.opacity > 0.0;
        }
        true
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.opacity <= 0.0 || self.character.is_whitespace() {
            return;
        }
        let mut buf = [0u8; 4];
        let text = self.character.encode_utf8(&mut buf);
        let style = TextStyle {
            font_px: self.font_px,
            family: GLYPH_FONT_FAMILY,
            fill: GLYPH_FILL,
            outline: GLYPH_OUTLINE,
            outline_width: GLYPH_OUTLINE_WIDTH,
        };
        surface.save();
        surface.translate(self.current_pos);
        surface.rotate(self.rotation);
        surface.scale(self.scale, self.scale);
        surface.set_alpha(self.opacity);
        surface.set_glow(GLYPH_GLOW_BLUR, GLYPH_GLOW);
        surface.draw_text(text, Vec2::ZERO, &style);
        surface.clear_glow();
        surface.restore();
    }
}

/// Lay out both text lines centred on the viewport, one glyph per character.
pub fn layout_groups<R: Rng>(
    lines: &[String; 2],
    viewport: Vec2,
    rng: &mut R,
    now_ms: f64,
) -> Vec<FloatingGlyph> {
    let min_side = viewport.x.min(viewport.y);
    let mut out = Vec::new();
    for (group, line) in lines.iter().enumerate() {
        let font_px = min_side * GLYPH_SIZE_FRAC[group];
        let advance = font_px * GLYPH_ADVANCE;
        let n = line.chars().count();
        if n == 0 {
            continue;
        }
        let x0 = viewport.x * 0.5 - advance * (n - 1) as f32 * 0.5;
        let y = viewport.y * GLYPH_LINE_Y_FRAC[group];
        for (i, character) in line.chars().enumerate() {
            let target_pos = Vec2::new(x0 + advance * i as f32, y);
            let scatter = Vec2::new(
                rng.gen_range(-GLYPH_START_OFFSET.0..=GLYPH_START_OFFSET.0),
                rng.gen_range(-GLYPH_START_OFFSET.1..=GLYPH_START_OFFSET.1),
            );
            out.push(FloatingGlyph {
                character,
                current_pos: target_pos + scatter,
                target_pos,
                opacity: 0.0,
                scale: GLYPH_START_SCALE,
                target_scale: 1.0,
                rotation: rng.gen_range(-GLYPH_START_ROTATION..=GLYPH_START_ROTATION),
                target_rotation: 0.0,
                reveal_delay_ms: GLYPH_BASE_DELAY_MS[group] + GLYPH_STAGGER_MS[group] * i as f64,
                spawn_time_ms: now_ms,
                group,
                font_px,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lines(a: &str, b: &str) -> [String; 2] {
        [a.to_string(), b.to_string()]
    }

    #[test]
    fn one_glyph_per_character_with_staggered_delays() {
        let mut rng = StdRng::seed_from_u64(1);
        let glyphs = layout_groups(&lines("ABC", "DE"), Vec2::new(1000.0, 800.0), &mut rng, 0.0);
        assert_eq!(glyphs.len(), 5);
        let g0: Vec<_> = glyphs.iter().filter(|g| g.group == 0).collect();
        let g1: Vec<_> = glyphs.iter().filter(|g| g.group == 1).collect();
        assert_eq!(g0.len(), 3);
        assert_eq!(g1.len(), 2);
        assert!(g0.windows(2).all(|w| w[1].reveal_delay_ms > w[0].reveal_delay_ms));
        // second line follows the first
        assert!(g1[0].reveal_delay_ms > g0[0].reveal_delay_ms);
        // first line is centred
        let mid = (g0[0].target_pos.x + g0[2].target_pos.x) * 0.5;
        assert!((mid - 500.0).abs() < 1e-3);
    }

    #[test]
    fn glyph_waits_for_delay_then_converges() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut g = layout_groups(&lines("X", ""), Vec2::new(800.0, 600.0), &mut rng, 0.0)
            .remove(0);
        let start = g.current_pos;
        assert!(g.step(g.reveal_delay_ms - 1.0, false));
        assert_eq!(g.current_pos, start);
        assert_eq!(g.opacity, 0.0);

        let mut t = g.reveal_delay_ms;
        for _ in 0..120 {
            g.step(t, false);
            t += 16.0;
        }
        assert!((g.current_pos - g.target_pos).length() < 0.5);
        assert!((g.scale - 1.0).abs() < 0.01);
        assert!(g.opacity > 0.99);
    }

    #[test]
    fn fading_only_lowers_opacity_until_removed() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = layout_groups(&lines("Y", ""), Vec2::new(800.0, 600.0), &mut rng, 0.0)
            .remove(0);
        g.opacity = 0.5;
        let mut prev = g.opacity;
        let mut steps = 0;
        while g.step(10_000.0, true) {
            assert!(g.opacity < prev);
            prev = g.opacity;
            steps += 1;
            assert!(steps < 100);
        }
        assert_eq!(g.opacity, 0.0);
    }

    #[test]
    fn unrevealed_glyph_is_dropped_once_fading() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut g = layout_groups(&lines("Z", ""), Vec2::new(800.0, 600.0), &mut rng, 0.0)
            .remove(0);
        assert!(!g.step(1.0, true));
    }
}
