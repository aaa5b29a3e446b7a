//! Error types for Flipbook

use thiserror::Error;

/// The main error type for Flipbook operations
#[derive(Debug, Error)]
pub enum FlipbookError {
    #[error("Animation not found: {0}")]
    AnimationNotFound(String),

    #[error("Animation '{0}' has no frames")]
    EmptyFrames(String),

    #[error("Animation '{name}' has invalid frame rate: {fps} (must be finite and > 0)")]
    InvalidFrameRate { name: String, fps: f64 },

    #[error("Animation '{name}' has invalid start delay: {delay} (must be finite and >= 0)")]
    InvalidDelay { name: String, delay: f64 },

    #[error("Start frame {frame} is out of range for '{name}' ({frame_count} frames)")]
    StartFrameOutOfRange {
        name: String,
        frame: usize,
        frame_count: usize,
    },

    #[error("Trigger '{trigger}' on '{name}' targets frame {frame}, but only {frame_count} frames exist")]
    TriggerOutOfRange {
        name: String,
        trigger: String,
        frame: usize,
        frame_count: usize,
    },

    #[error("Duplicate animation name: {0}")]
    DuplicateAnimation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for Flipbook operations
pub type Result<T> = std::result::Result<T, FlipbookError>;

impl From<toml::de::Error> for FlipbookError {
    fn from(err: toml::de::Error) -> Self {
        FlipbookError::TomlParse(err.to_string())
    }
}
