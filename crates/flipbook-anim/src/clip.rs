//! Core sprite animation data types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Callback invoked with the frame index when its trigger fires
pub type TriggerCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// A single image in a frame sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteFrame {
    /// Texture asset name or path
    pub texture: String,
    /// Sub-rectangle of the texture (whole texture when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<FrameRegion>,
}

impl SpriteFrame {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            region: None,
        }
    }

    pub fn with_region(mut self, region: FrameRegion) -> Self {
        self.region = Some(region);
        self
    }
}

/// Pixel rectangle inside a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A callback bound to a specific frame index.
///
/// `name` is what configuration files refer to; the callback itself is bound
/// at runtime and never serialized.
#[derive(Clone, Serialize, Deserialize)]
pub struct FrameTrigger {
    /// Frame index that fires this trigger when it becomes current
    pub frame: usize,
    /// Trigger name (consumed by game logic / audio cues)
    pub name: String,
    #[serde(skip)]
    callback: Option<TriggerCallback>,
}

impl FrameTrigger {
    pub fn new(frame: usize, name: impl Into<String>) -> Self {
        Self {
            frame,
            name: name.into(),
            callback: None,
        }
    }

    /// Attach a callback, replacing any previous one.
    pub fn with_callback(mut self, callback: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Run the bound callback, if any.
    pub fn invoke(&self, frame: usize) {
        if let Some(callback) = &self.callback {
            callback(frame);
        }
    }
}

impl fmt::Debug for FrameTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameTrigger")
            .field("frame", &self.frame)
            .field("name", &self.name)
            .field("bound", &self.callback.is_some())
            .finish()
    }
}

/// A named frame sequence plus its timing and looping rules.
///
/// Definitions are configuration: clocks share them through `Arc` and never
/// mutate them. Derived timing is computed by [`crate::timing::prepare`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDef {
    /// Lookup name
    pub name: String,
    /// Playback rate in frames per second
    pub fps: f64,
    /// Restart from the beginning after the last frame
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Play forward then backward as one cycle
    #[serde(default)]
    pub ping_pong: bool,
    /// Seconds to wait after `play` before time starts advancing
    #[serde(default)]
    pub start_delay: f64,
    /// Ordered frame sequence
    #[serde(default)]
    pub frames: Vec<SpriteFrame>,
    /// Per-frame triggers, fired in this order
    #[serde(default)]
    pub triggers: Vec<FrameTrigger>,
}

impl AnimationDef {
    pub fn new(name: impl Into<String>, fps: f64, frames: Vec<SpriteFrame>) -> Self {
        Self {
            name: name.into(),
            fps,
            looping: false,
            ping_pong: false,
            start_delay: 0.0,
            frames,
            triggers: Vec::new(),
        }
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn ping_pong(mut self, ping_pong: bool) -> Self {
        self.ping_pong = ping_pong;
        self
    }

    pub fn start_delay(mut self, seconds: f64) -> Self {
        self.start_delay = seconds;
        self
    }

    pub fn with_trigger(mut self, trigger: FrameTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Bind a callback to every trigger with the given name.
    ///
    /// Returns how many triggers were bound.
    pub fn bind_trigger(
        &mut self,
        name: &str,
        callback: impl Fn(usize) + Send + Sync + 'static,
    ) -> usize {
        let callback: TriggerCallback = Arc::new(callback);
        let mut bound = 0;
        for trigger in self.triggers.iter_mut().filter(|t| t.name == name) {
            trigger.callback = Some(Arc::clone(&callback));
            bound += 1;
        }
        bound
    }

    /// Triggers bound to `frame`, in definition order.
    pub fn triggers_at(&self, frame: usize) -> impl Iterator<Item = &FrameTrigger> {
        self.triggers.iter().filter(move |t| t.frame == frame)
    }
}

/// The configuration surface for one animated sprite: its animations and
/// an optional animation to start on initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteSet {
    /// Animation played once by `AnimationClock::initialize`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<String>,
    /// Animations in lookup order
    #[serde(default, rename = "animation")]
    pub animations: Vec<AnimationDef>,
}

impl SpriteSet {
    pub fn get(&self, name: &str) -> Option<&AnimationDef> {
        self.animations.iter().find(|a| a.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AnimationDef> {
        self.animations.iter_mut().find(|a| a.name == name)
    }
}
