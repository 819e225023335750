//! Effect engine: the choreographed overlay played once per trigger.
//!
//! One engine owns every live entity population plus the episode-wide
//! scalars. The frame driver calls [`EffectEngine::update`] and
//! [`EffectEngine::render`] once per displayed frame, fresh pose data or not.
//! Delayed work is expressed through a [`SpawnSchedule`] read against the
//! injected [`Clock`], so a [`crate::clock::ManualClock`] makes a whole
//! episode reproducible.

pub mod burst;
pub mod global;
pub mod glyphs;
pub mod ink;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::{Clock, InstantClock};
use crate::constants::*;
use crate::dwell::TriggerTarget;
use crate::schedule::SpawnSchedule;
use crate::surface::Surface;

pub use burst::{BurstLayer, BurstLayerSpec, BurstLine};
pub use global::GlobalEffect;
pub use glyphs::FloatingGlyph;
pub use ink::{InkParticle, ShapeKind};

#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    /// The two text groups; the second is revealed after the first.
    pub text: [String; 2],
    /// Flip anchors horizontally to match a selfie-mirrored video.
    pub mirror: bool,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            text: [
                DEFAULT_TEXT_LINE_1.to_string(),
                DEFAULT_TEXT_LINE_2.to_string(),
            ],
            mirror: true,
        }
    }
}

/// Live entity counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Population {
    pub burst_lines: usize,
    pub ink: usize,
    pub glyphs: usize,
    /// Ink waves armed but not yet spawned.
    pub pending_waves: usize,
}

impl Population {
    pub fn is_empty(&self) -> bool {
        self.burst_lines == 0 && self.ink == 0 && self.glyphs == 0 && self.pending_waves == 0
    }

    pub fn total(&self) -> usize {
        self.burst_lines + self.ink + self.glyphs
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Spawn {
    InkWave(usize),
}

/// Map a normalized anchor onto surface pixels.
pub fn anchor_to_surface(anchor: Vec2, viewport: Vec2, mirror: bool) -> Vec2 {
    let x = if mirror { 1.0 - anchor.x } else { anchor.x };
    Vec2::new(x * viewport.x, anchor.y * viewport.y)
}

pub struct EffectEngine<C: Clock = InstantClock> {
    clock: C,
    config: EffectConfig,
    viewport: Vec2,
    rng: StdRng,
    global: GlobalEffect,
    anchor: Option<Vec2>,
    origin: Vec2,
    burst_lines: Vec<BurstLine>,
    ink: Vec<InkParticle>,
    glyphs: Vec<FloatingGlyph>,
    schedule: SpawnSchedule<Spawn>,
}

impl<C: Clock> EffectEngine<C> {
    pub fn new(clock: C, config: EffectConfig, viewport: Vec2, seed: u64) -> Self {
        Self {
            clock,
            config,
            viewport,
            rng: StdRng::seed_from_u64(seed),
            global: GlobalEffect::default(),
            anchor: None,
            origin: viewport * 0.5,
            burst_lines: Vec::new(),
            ink: Vec::new(),
            glyphs: Vec::new(),
            schedule: SpawnSchedule::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn set_mirror(&mut self, mirror: bool) {
        self.config.mirror = mirror;
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.global.is_active
    }

    #[inline]
    pub fn can_trigger(&self) -> bool {
        !self.global.is_active
    }

    /// No active episode and nothing left on screen.
    pub fn is_complete(&self) -> bool {
        !self.global.is_active && self.population().is_empty()
    }

    pub fn population(&self) -> Population {
        Population {
            burst_lines: self.burst_lines.len(),
            ink: self.ink.len(),
            glyphs: self.glyphs.len(),
            pending_waves: self.schedule.len(),
        }
    }

    pub fn global(&self) -> &GlobalEffect {
        &self.global
    }

    /// Normalized anchor of the current or last episode.
    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Surface-space point the bursts and ink radiate from.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn burst_lines(&self) -> &[BurstLine] {
        &self.burst_lines
    }

    pub fn ink(&self) -> &[InkParticle] {
        &self.ink
    }

    pub fn glyphs(&self) -> &[FloatingGlyph] {
        &self.glyphs
    }

    /// Start an episode at a normalized anchor. Refused (returns `false`)
    /// while another episode is active.
    pub fn trigger(&mut self, anchor: Vec2) -> bool {
        if self.global.is_active {
            log::debug!("[effect] trigger refused, episode still active");
            return false;
        }
        let now = self.clock.now_ms();
        self.global.start(now);
        self.anchor = Some(anchor);
        self.origin = anchor_to_surface(anchor, self.viewport, self.config.mirror);

        let diagonal = self.viewport.length();
        for spec in &BURST_LAYERS {
            burst::spawn_layer(spec, &mut self.rng, diagonal, now, &mut self.burst_lines);
        }

        self.schedule.arm(
            now,
            INK_WAVE_DELAYS_MS
                .iter()
                .enumerate()
                .map(|(i, d)| (*d, Spawn::InkWave(i))),
        );
        self.spawn_due(now);

        self.glyphs.extend(glyphs::layout_groups(
            &self.config.text,
            self.viewport,
            &mut self.rng,
            now,
        ));

        log::info!(
            "[effect] triggered at ({:.3}, {:.3}) -> ({:.0}, {:.0}) px, {} lines, {} glyphs",
            anchor.x,
            anchor.y,
            self.origin.x,
            self.origin.y,
            self.burst_lines.len(),
            self.glyphs.len()
        );
        true
    }

    fn spawn_due(&mut self, now_ms: f64) {
        for spawn in self.schedule.drain_due(now_ms) {
            match spawn {
                Spawn::InkWave(wave) => {
                    ink::spawn_wave(&mut self.rng, self.origin, wave, &mut self.ink);
                    log::debug!("[effect] ink wave {} ({} live)", wave, self.ink.len());
                }
            }
        }
    }

    /// Advance every live entity by one displayed frame.
    pub fn update(&mut self) {
        if !self.global.is_active && self.population().is_empty() && self.global.is_settled() {
            return;
        }
        let now = self.clock.now_ms();
        self.global.step(&mut self.rng);
        self.spawn_due(now);

        self.burst_lines.retain_mut(|l| l.step(now));
        self.ink.retain_mut(|p| p.step());

        let elapsed = self.global.elapsed_ms(now);
        let fading = !self.global.is_active || elapsed >= TEXT_FADE_START_MS;
        self.glyphs.retain_mut(|g| g.step(now, fading));

        if self.global.is_active && elapsed > EFFECT_MIN_DURATION_MS && self.population().is_empty()
        {
            self.global.finish();
            log::info!("[effect] episode complete after {:.0}ms", elapsed);
        }
    }

    /// Draw back to front. Does nothing when there is nothing to show.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        if !self.global.is_active && self.population().total() == 0 && self.global.is_settled() {
            return;
        }
        surface.save();
        let shake = self.global.shake_offset;
        if shake != Vec2::ZERO {
            surface.translate(shake);
        }
        for line in self.layer(BurstLayer::Background) {
            line.draw(surface, self.origin);
        }
        for p in &self.ink {
            p.draw(surface);
        }
        for line in self.layer(BurstLayer::Foreground) {
            line.draw(surface, self.origin);
        }
        for g in &self.glyphs {
            g.draw(surface);
        }
        self.global.draw_flash(surface);
        self.global.draw_vignette(surface);
        surface.restore();
    }

    fn layer(&self, layer: BurstLayer) -> impl Iterator<Item = &BurstLine> {
        self.burst_lines.iter().filter(move |l| l.layer == layer)
    }
}

impl<C: Clock> TriggerTarget for EffectEngine<C> {
    fn can_trigger(&self) -> bool {
        EffectEngine::can_trigger(self)
    }

    fn trigger(&mut self, anchor: Vec2) -> bool {
        EffectEngine::trigger(self, anchor)
    }
}
