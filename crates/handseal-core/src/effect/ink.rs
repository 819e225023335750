//! Ink particles: drag, gravity, spin and a late multiplicative fade.

use glam::Vec2;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::TAU;

use super::burst::range_f32;
use crate::constants::*;
use crate::surface::{Path, Rgba, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// Irregular blob with a few satellite droplets.
    Splatter,
    /// Teardrop trailing behind its motion.
    Drop,
    /// Thin ellipse stretched along its motion.
    Streak,
}

const SHAPES: [ShapeKind; 3] = [ShapeKind::Splatter, ShapeKind::Drop, ShapeKind::Streak];

#[derive(Clone, Debug, PartialEq)]
pub struct InkParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub opacity: f32,
    pub color: Rgba,
    pub age: u32,
    pub max_age: u32,
    pub shape: ShapeKind,
    /// Splatter outline radii as multiples of `size`, one per vertex.
    pub outline: SmallVec<[f32; 12]>,
    /// Splatter satellites: offset (in `size` units) and radius.
    pub droplets: SmallVec<[(Vec2, f32); 4]>,
}

impl InkParticle {
    pub fn spawn<R: Rng>(rng: &mut R, origin: Vec2, base_speed: f32) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let speed = base_speed * range_f32(rng, INK_SPEED_JITTER);
        let scatter = Vec2::from_angle(rng.gen_range(0.0..TAU)) * rng.gen_range(0.0..INK_SPAWN_RADIUS);
        let shape = WeightedIndex::new(INK_SHAPE_WEIGHTS)
            .map(|w| SHAPES[w.sample(rng)])
            .unwrap_or(ShapeKind::Splatter);
        let velocity = Vec2::from_angle(angle) * speed;

        let mut outline = SmallVec::new();
        let mut droplets = SmallVec::new();
        if shape == ShapeKind::Splatter {
            let n = rng.gen_range(INK_SPLATTER_VERTICES.0..=INK_SPLATTER_VERTICES.1);
            for _ in 0..n {
                outline.push(rng.gen_range(0.55..1.25));
            }
            let drops = rng.gen_range(INK_SPLATTER_DROPLETS.0..=INK_SPLATTER_DROPLETS.1);
            for _ in 0..drops {
                let dir = Vec2::from_angle(rng.gen_range(0.0..TAU));
                droplets.push((dir * rng.gen_range(1.4..2.4), rng.gen_range(0.12..0.3)));
            }
        }

        let color = INK_PALETTE
            .choose(rng)
            .map(|c| Rgba::from_array(*c))
            .unwrap_or(Rgba::BLACK);

        Self {
            position: origin + scatter,
            velocity,
            size: range_f32(rng, INK_SIZE_RANGE),
            rotation: match shape {
                ShapeKind::Splatter => rng.gen_range(0.0..TAU),
                _ => heading(velocity),
            },
            rotation_speed: match shape {
                ShapeKind::Splatter => rng.gen_range(-INK_SPIN_MAX..INK_SPIN_MAX),
                _ => 0.0,
            },
            opacity: rng.gen_range(0.85..=1.0),
            color,
            age: 0,
            max_age: rng.gen_range(INK_MAX_AGE_RANGE.0..=INK_MAX_AGE_RANGE.1),
            shape,
            outline,
            droplets,
        }
    }

    /// Advance one update. Returns `false` once the particle should go.
    pub fn step(&mut self) -> bool {
        self.position += self.velocity;
        self.velocity *= INK_DRAG;
        self.velocity.y += INK_GRAVITY;
        self.rotation += self.rotation_speed;
        self.age += 1;
        if self.age as f32 > INK_FADE_START * self.max_age as f32 {
            self.opacity *= INK_FADE_FACTOR;
        }
        self.age < self.max_age && self.opacity > INK_OPACITY_FLOOR
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.opacity <= 0.0 {
            return;
        }
        let color = self.color.with_alpha(self.opacity);
        let s = self.size;
        surface.save();
        surface.translate(self.position);
        match self.shape {
            ShapeKind::Splatter => {
                surface.rotate(self.rotation);
                let n = self.outline.len().max(1) as f32;
                let pts: SmallVec<[Vec2; 12]> = self
                    .outline
                    .iter()
                    .enumerate()
                    .map(|(i, r)| Vec2::from_angle(i as f32 / n * TAU) * (r * s))
                    .collect();
                surface.fill_path(&Path::polygon(&pts), color);
                for (offset, radius) in &self.droplets {
                    surface.fill_path(&Path::new().circle(*offset * s, radius * s), color);
                }
            }
            ShapeKind::Drop => {
                // head leads along the motion, tail trails behind
                surface.rotate(heading(self.velocity));
                let path = Path::new()
                    .move_to(Vec2::new(-2.2 * s, 0.0))
                    .bezier_to(
                        Vec2::new(-0.6 * s, -1.1 * s),
                        Vec2::new(1.2 * s, -0.9 * s),
                        Vec2::new(s, 0.0),
                    )
                    .bezier_to(
                        Vec2::new(1.2 * s, 0.9 * s),
                        Vec2::new(-0.6 * s, 1.1 * s),
                        Vec2::new(-2.2 * s, 0.0),
                    )
                    .close();
                surface.fill_path(&path, color);
            }
            ShapeKind::Streak => {
                surface.rotate(heading(self.velocity));
                let path = Path::new().ellipse(Vec2::ZERO, Vec2::new(2.4 * s, 0.4 * s), 0.0);
                surface.fill_path(&path, color);
            }
        }
        surface.restore();
    }
}

#[inline]
fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

pub fn spawn_wave<R: Rng>(rng: &mut R, origin: Vec2, wave: usize, out: &mut Vec<InkParticle>) {
    let (Some(&count), Some(&speed)) = (INK_WAVE_COUNTS.get(wave), INK_WAVE_SPEEDS.get(wave))
    else {
        return;
    };
    out.reserve(count);
    for _ in 0..count {
        out.push(InkParticle::spawn(rng, origin, speed));
    }
}
