//! Derived per-session timing, computed fresh on every `play`

use crate::clip::AnimationDef;
use flipbook_core::{FlipbookError, Result};

/// Timing metadata derived from an [`AnimationDef`].
///
/// Kept separate from the definition so shared definitions are never
/// mutated; a clock computes its own copy when playback starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedTiming {
    /// `1 / fps`
    pub seconds_per_frame: f64,
    /// Time to play every frame once, forward
    pub iteration_duration: f64,
    /// Infinite when looping, two iterations for ping-pong, else one
    pub total_duration: f64,
    pub frame_count: usize,
    pub start_delay: f64,
}

impl DerivedTiming {
    pub fn last_frame(&self) -> usize {
        self.frame_count - 1
    }

    /// Whether `frame` is the first or last frame of the sequence
    pub fn is_boundary(&self, frame: usize) -> bool {
        frame == 0 || frame == self.last_frame()
    }

    /// Accumulator value at the start of `frame`
    pub fn frame_start(&self, frame: usize) -> f64 {
        frame as f64 * self.seconds_per_frame
    }
}

/// Compute derived timing, rejecting definitions that cannot be played.
pub fn prepare(def: &AnimationDef) -> Result<DerivedTiming> {
    if def.frames.is_empty() {
        return Err(FlipbookError::EmptyFrames(def.name.clone()));
    }
    if !def.fps.is_finite() || def.fps <= 0.0 {
        return Err(FlipbookError::InvalidFrameRate {
            name: def.name.clone(),
            fps: def.fps,
        });
    }
    if !def.start_delay.is_finite() || def.start_delay < 0.0 {
        return Err(FlipbookError::InvalidDelay {
            name: def.name.clone(),
            delay: def.start_delay,
        });
    }

    let frame_count = def.frames.len();
    let seconds_per_frame = 1.0 / def.fps;
    let iteration_duration = seconds_per_frame * frame_count as f64;
    let total_duration = if def.looping {
        f64::INFINITY
    } else if def.ping_pong {
        2.0 * iteration_duration
    } else {
        iteration_duration
    };

    Ok(DerivedTiming {
        seconds_per_frame,
        iteration_duration,
        total_duration,
        frame_count,
        start_delay: def.start_delay,
    })
}
