pub mod clock;
pub mod config;
pub mod constants;
pub mod debug;
pub mod dwell;
pub mod easing;
pub mod effect;
pub mod error;
pub mod frame_cache;
pub mod landmarks;
pub mod pose;
pub mod schedule;
pub mod smoothing;
pub mod surface;
pub mod synth;

pub use clock::*;
pub use config::*;
pub use debug::*;
pub use dwell::*;
pub use effect::{anchor_to_surface, EffectConfig, EffectEngine, Population};
pub use error::*;
pub use frame_cache::*;
pub use landmarks::{Hand, HandSide, Handedness, Hands};
pub use pose::*;
pub use smoothing::*;
pub use surface::*;
