//! TOML-based sprite set loading

use crate::clip::{AnimationDef, FrameRegion, SpriteFrame, SpriteSet};
use crate::timing::prepare;
use flipbook_core::{FlipbookError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// On-disk layout: animations may list frames or describe a sheet grid.
#[derive(Deserialize)]
struct SpriteSetFile {
    #[serde(default)]
    autoplay: Option<String>,
    #[serde(default)]
    animation: Vec<AnimationEntry>,
}

#[derive(Deserialize)]
struct AnimationEntry {
    #[serde(flatten)]
    def: AnimationDef,
    #[serde(default)]
    sheet: Option<SheetLayout>,
}

/// Uniform grid of frames packed into one texture, read row-major
#[derive(Debug, Clone, Deserialize)]
pub struct SheetLayout {
    pub texture: String,
    pub columns: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Number of frames to take
    pub count: u32,
    /// Index of the first cell to take
    #[serde(default)]
    pub first: u32,
}

impl SheetLayout {
    /// Cut the grid into frames.
    pub fn frames(&self) -> Result<Vec<SpriteFrame>> {
        if self.columns == 0 {
            return Err(FlipbookError::Config(format!(
                "Sheet '{}' has zero columns",
                self.texture
            )));
        }
        let overflow = || {
            FlipbookError::Config(format!(
                "Sheet '{}' cells fall outside the addressable texture area",
                self.texture
            ))
        };
        let end = self.first.checked_add(self.count).ok_or_else(overflow)?;

        (self.first..end)
            .map(|cell| {
                let x = (cell % self.columns)
                    .checked_mul(self.frame_width)
                    .ok_or_else(overflow)?;
                let y = (cell / self.columns)
                    .checked_mul(self.frame_height)
                    .ok_or_else(overflow)?;
                Ok(SpriteFrame::new(self.texture.clone()).with_region(FrameRegion {
                    x,
                    y,
                    width: self.frame_width,
                    height: self.frame_height,
                }))
            })
            .collect()
    }
}

/// Load a sprite set from a `.sprite.toml` file.
///
/// ```toml
/// autoplay = "idle"
///
/// [[animation]]
/// name = "idle"
/// fps = 6.0
/// loop = true
/// frames = [{ texture = "hero_idle_0.png" }, { texture = "hero_idle_1.png" }]
///
/// [[animation]]
/// name = "attack"
/// fps = 12.0
/// ping_pong = true
/// sheet = { texture = "hero_attack.png", columns = 4, frame_width = 32, frame_height = 32, count = 6 }
///
/// [[animation.triggers]]
/// frame = 3
/// name = "hit"
/// ```
pub fn load_sprite_set_from_file(path: &Path) -> Result<SpriteSet> {
    let content = std::fs::read_to_string(path)?;
    load_sprite_set_from_str(&content, path)
}

/// Parse and validate a sprite set from a TOML string. `path` is only used
/// in error messages.
pub fn load_sprite_set_from_str(content: &str, path: &Path) -> Result<SpriteSet> {
    let file: SpriteSetFile = toml::from_str(content).map_err(|e| {
        FlipbookError::TomlParse(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    let mut animations = Vec::with_capacity(file.animation.len());
    for entry in file.animation {
        let mut def = entry.def;
        if let Some(sheet) = entry.sheet {
            if !def.frames.is_empty() {
                return Err(FlipbookError::Config(format!(
                    "Animation '{}' declares both frames and a sheet",
                    def.name
                )));
            }
            def.frames = sheet.frames()?;
        }
        animations.push(def);
    }

    let set = SpriteSet {
        autoplay: file.autoplay,
        animations,
    };
    validate_sprite_set(&set)?;
    Ok(set)
}

/// Check every animation can be played and every reference resolves.
pub fn validate_sprite_set(set: &SpriteSet) -> Result<()> {
    let mut names = HashSet::new();
    for def in &set.animations {
        if !names.insert(def.name.as_str()) {
            return Err(FlipbookError::DuplicateAnimation(def.name.clone()));
        }

        let timing = prepare(def)?;

        if let Some(trigger) = def.triggers.iter().find(|t| t.frame >= timing.frame_count) {
            return Err(FlipbookError::TriggerOutOfRange {
                name: def.name.clone(),
                trigger: trigger.name.clone(),
                frame: trigger.frame,
                frame_count: timing.frame_count,
            });
        }
    }

    if let Some(autoplay) = &set.autoplay {
        if !names.contains(autoplay.as_str()) {
            return Err(FlipbookError::AnimationNotFound(autoplay.clone()));
        }
    }

    Ok(())
}
