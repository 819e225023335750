//! Tuning constants for detection, dwell and the effect choreography.
//!
//! Timings in `_MS` are milliseconds on the engine clock. Everything else that
//! moves (growth, drag, gravity, decay) is applied once per `update()` call,
//! i.e. once per displayed frame.

use crate::effect::burst::{BurstLayer, BurstLayerSpec};

// Pose detection
pub const LANDMARK_COUNT: usize = 21;
pub const PROXIMITY_THRESHOLD: f32 = 0.15; // tip distance / wrist-to-middle-tip distance
pub const MIN_REFERENCE_DISTANCE: f32 = 1e-4; // below this the hand is treated as collapsed

// Dwell
pub const DEFAULT_HOLD_DURATION_MS: u32 = 3000;
pub const DEFAULT_SMOOTHING_FACTOR: f32 = 0.35;

// Global effects
pub const FLASH_DECAY: f32 = 0.9;
pub const FLASH_FLOOR: f32 = 0.01;
pub const SHAKE_INITIAL: f32 = 26.0; // px
pub const SHAKE_DECAY: f32 = 0.92;
pub const SHAKE_NOISE_FLOOR: f32 = 0.5; // px
pub const VIGNETTE_INNER_FRAC: f32 = 0.35; // of the half-diagonal
pub const VIGNETTE_EDGE_ALPHA: f32 = 0.7;

// Episode timing
pub const EFFECT_MIN_DURATION_MS: f64 = 3500.0;
pub const TEXT_FADE_START_MS: f64 = 2500.0;

// Ink waves: (delay, count, base speed px/frame)
pub const INK_WAVE_DELAYS_MS: [f64; 4] = [0.0, 100.0, 200.0, 350.0];
pub const INK_WAVE_COUNTS: [usize; 4] = [42, 30, 22, 14];
pub const INK_WAVE_SPEEDS: [f32; 4] = [5.0, 7.0, 9.5, 12.5];
pub const INK_SPEED_JITTER: (f32, f32) = (0.45, 1.35); // multiplier on wave speed
pub const INK_SPAWN_RADIUS: f32 = 18.0; // px scatter around the origin
pub const INK_SIZE_RANGE: (f32, f32) = (4.0, 15.0);
pub const INK_MAX_AGE_RANGE: (u32, u32) = (55, 110); // frames
pub const INK_DRAG: f32 = 0.955;
pub const INK_GRAVITY: f32 = 0.22; // px/frame^2, +y is down
pub const INK_FADE_START: f32 = 0.6; // fraction of max age
pub const INK_FADE_FACTOR: f32 = 0.9;
pub const INK_OPACITY_FLOOR: f32 = 0.01;
pub const INK_SPIN_MAX: f32 = 0.18; // rad/frame
// Shape weights: splatter, drop, streak
pub const INK_SHAPE_WEIGHTS: [u32; 3] = [40, 35, 25];
pub const INK_SPLATTER_VERTICES: (usize, usize) = (7, 11);
pub const INK_SPLATTER_DROPLETS: (usize, usize) = (1, 4);
pub const INK_PALETTE: [[u8; 3]; 4] = [
    [12, 10, 16],  // sumi black
    [28, 18, 46],  // indigo
    [64, 20, 88],  // violet
    [118, 16, 34], // lacquer red
];

// Burst lines
pub const BURST_LAYERS: [BurstLayerSpec; 3] = [
    BurstLayerSpec {
        layer: BurstLayer::Background,
        count: 26,
        width: (6.0, 12.0),
        growth: (16.0, 26.0),
        length_frac: (0.45, 0.75),
        delay_ms: (0.0, 80.0),
        decay: 0.025,
        color: [22, 16, 34],
    },
    BurstLayerSpec {
        layer: BurstLayer::Foreground,
        count: 38,
        width: (1.5, 4.0),
        growth: (34.0, 54.0),
        length_frac: (0.3, 0.6),
        delay_ms: (60.0, 160.0),
        decay: 0.04,
        color: [246, 240, 255],
    },
    BurstLayerSpec {
        layer: BurstLayer::Background,
        count: 8,
        width: (14.0, 20.0),
        growth: (11.0, 17.0),
        length_frac: (0.8, 1.0),
        delay_ms: (200.0, 320.0),
        decay: 0.02,
        color: [92, 24, 120],
    },
];

// Floating glyphs
pub const DEFAULT_TEXT_LINE_1: &str = "領域展開";
pub const DEFAULT_TEXT_LINE_2: &str = "無量空処";
pub const GLYPH_FONT_FAMILY: &str = "\"Yu Mincho\", \"Hiragino Mincho ProN\", serif";
pub const GLYPH_SIZE_FRAC: [f32; 2] = [0.14, 0.085]; // of min(width, height)
pub const GLYPH_LINE_Y_FRAC: [f32; 2] = [0.40, 0.57];
pub const GLYPH_ADVANCE: f32 = 1.08; // em
pub const GLYPH_BASE_DELAY_MS: [f64; 2] = [250.0, 850.0];
pub const GLYPH_STAGGER_MS: [f64; 2] = [110.0, 80.0];
pub const GLYPH_REVEAL_WINDOW_MS: f64 = 400.0;
pub const GLYPH_BLEND_MIN: f32 = 0.06;
pub const GLYPH_BLEND_MAX: f32 = 0.32;
pub const GLYPH_START_OFFSET: (f32, f32) = (140.0, 90.0); // px, max scatter per axis
pub const GLYPH_START_SCALE: f32 = 2.6;
pub const GLYPH_START_ROTATION: f32 = 0.6; // rad, max magnitude
pub const GLYPH_FADE_STEP: f32 = 0.045;
pub const GLYPH_GLOW_BLUR: f32 = 24.0;
pub const GLYPH_OUTLINE_WIDTH: f32 = 6.0;
