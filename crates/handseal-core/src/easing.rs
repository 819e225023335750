//! Easing helpers shared by the glyph reveal and the anchor smoother.

use glam::Vec2;

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// One step of the exponential blend `current += (target - current) * factor`.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

#[inline]
pub fn approach_vec2(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current + (target - current) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_cubic_is_clamped_and_monotonic() {
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        let mut prev = 0.0;
        for i in 1..=20 {
            let v = ease_out_cubic(i as f32 / 20.0);
            assert!(v >= prev);
            prev = v;
        }
        // front-loaded
        assert!(ease_out_cubic(0.5) > 0.8);
    }

    #[test]
    fn approach_converges() {
        let mut v = 0.0;
        for _ in 0..60 {
            v = approach(v, 1.0, 0.2);
        }
        assert!((v - 1.0).abs() < 1e-4);
        assert_eq!(approach_vec2(Vec2::ZERO, Vec2::ONE, 1.0), Vec2::ONE);
    }
}
