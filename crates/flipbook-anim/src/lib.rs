//! Sprite animation playback for Flipbook
//!
//! Turns accumulated frame time into a current frame index for named
//! sprite animations:
//! - `clip` — animation definitions, frames and per-frame triggers
//! - `timing` — per-session derived timing (`prepare`)
//! - `clock` — `AnimationClock`, the playback state machine
//! - `observer` — how a clock reaches the renderer (`FrameObserver`)
//! - `loader` — TOML sprite set files

pub mod clip;
pub mod clock;
pub mod loader;
pub mod observer;
pub mod timing;

pub use clip::{
    AnimationDef, FrameRegion, FrameTrigger, SpriteFrame, SpriteSet, TriggerCallback,
};
pub use clock::AnimationClock;
pub use loader::{load_sprite_set_from_file, load_sprite_set_from_str, validate_sprite_set};
pub use observer::{FrameEvent, FrameLog, FrameObserver, NullObserver};
pub use timing::{prepare, DerivedTiming};
