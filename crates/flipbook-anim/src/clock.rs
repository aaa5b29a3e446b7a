//! Frame-based playback state machine for one animated sprite

use crate::clip::{AnimationDef, SpriteSet};
use crate::observer::FrameObserver;
use crate::timing::{prepare, DerivedTiming};
use flipbook_core::{FlipbookError, Result};
use std::sync::Arc;

/// The animation currently loaded into a clock, with timing prepared for
/// this session.
#[derive(Debug, Clone)]
struct ActiveAnimation {
    def: Arc<AnimationDef>,
    timing: DerivedTiming,
}

/// Playback state owned by one clock. Replaced wholesale by `play`,
/// reset by `stop` / `disable`.
#[derive(Debug, Clone, Default)]
struct PlaybackState {
    active: Option<ActiveAnimation>,
    playing: bool,
    current_frame: usize,
    /// Animation time, clamped to `[0, total_duration]`
    elapsed_total: f64,
    elapsed_delay: f64,
    delay_elapsed: bool,
    reversed: bool,
}

/// Drives a sprite through its animations one `tick` at a time.
///
/// Owns an ordered list of shared animation definitions and the observer
/// that receives display updates and trigger notifications.
pub struct AnimationClock<O: FrameObserver> {
    animations: Vec<Arc<AnimationDef>>,
    autoplay: Option<String>,
    observer: O,
    state: PlaybackState,
}

impl<O: FrameObserver> AnimationClock<O> {
    pub fn new(animations: Vec<Arc<AnimationDef>>, observer: O) -> Self {
        Self {
            animations,
            autoplay: None,
            observer,
            state: PlaybackState::default(),
        }
    }

    /// Build a clock from a loaded sprite set, keeping its autoplay name for
    /// [`initialize`](Self::initialize).
    pub fn from_sprite_set(set: SpriteSet, observer: O) -> Self {
        let animations = set.animations.into_iter().map(Arc::new).collect();
        Self {
            animations,
            autoplay: set.autoplay,
            observer,
            state: PlaybackState::default(),
        }
    }

    pub fn with_autoplay(mut self, name: impl Into<String>) -> Self {
        self.autoplay = Some(name.into());
        self
    }

    /// Start the autoplay animation, if one was configured.
    ///
    /// The autoplay name is consumed, so later calls do nothing.
    pub fn initialize(&mut self) -> Result<()> {
        match self.autoplay.take() {
            Some(name) => self.play(&name),
            None => Ok(()),
        }
    }

    /// Linear search by exact name. Reports a miss through `log::warn!`.
    pub fn find_animation(&self, name: &str) -> Option<&Arc<AnimationDef>> {
        let found = self.animations.iter().find(|a| a.name == name);
        if found.is_none() {
            log::warn!("Animation '{name}' not found");
        }
        found
    }

    pub fn animation_names(&self) -> impl Iterator<Item = &str> {
        self.animations.iter().map(|a| a.name.as_str())
    }

    /// Mutable access to a definition, e.g. to change its `fps` or bind a
    /// trigger callback. A definition shared with other clocks is cloned
    /// first, so the change stays local to this clock.
    ///
    /// Timing is prepared when playback starts: the change applies from the
    /// next `play`.
    pub fn animation_mut(&mut self, name: &str) -> Option<&mut AnimationDef> {
        self.animations
            .iter_mut()
            .find(|a| a.name == name)
            .map(Arc::make_mut)
    }

    /// Play an animation from its first frame.
    pub fn play(&mut self, name: &str) -> Result<()> {
        self.play_from(name, 0)
    }

    /// Play an animation starting at `start_frame`, replacing any current
    /// playback. The start frame is displayed immediately.
    ///
    /// On error nothing changes: the previous animation (if any) keeps
    /// playing exactly as before.
    pub fn play_from(&mut self, name: &str, start_frame: usize) -> Result<()> {
        let def = self
            .find_animation(name)
            .cloned()
            .ok_or_else(|| FlipbookError::AnimationNotFound(name.to_string()))?;
        let timing = prepare(&def)?;
        if start_frame >= timing.frame_count {
            return Err(FlipbookError::StartFrameOutOfRange {
                name: def.name.clone(),
                frame: start_frame,
                frame_count: timing.frame_count,
            });
        }

        log::debug!("Playing '{}' from frame {}", def.name, start_frame);
        self.observer.set_displayed_frame(def.frames.get(start_frame));
        self.state = PlaybackState {
            active: Some(ActiveAnimation { def, timing }),
            playing: true,
            current_frame: start_frame,
            elapsed_total: timing.frame_start(start_frame),
            elapsed_delay: 0.0,
            delay_elapsed: false,
            reversed: false,
        };
        Ok(())
    }

    /// Advance playback by `delta_time` seconds.
    ///
    /// No-op while paused, with no current animation, or for a negative or
    /// non-finite `delta_time`.
    pub fn tick(&mut self, delta_time: f64) {
        if !self.state.playing || !delta_time.is_finite() || delta_time < 0.0 {
            return;
        }
        let Some(active) = &self.state.active else {
            return;
        };
        let def = Arc::clone(&active.def);
        let timing = active.timing;

        // Start delay: waiting time never counts toward animation time
        if !self.state.delay_elapsed {
            if self.state.elapsed_delay < timing.start_delay {
                self.state.elapsed_delay += delta_time;
                if self.state.elapsed_delay >= timing.start_delay {
                    self.state.delay_elapsed = true;
                }
                return;
            }
            self.state.delay_elapsed = true;
        }

        let step = if self.state.reversed {
            -delta_time
        } else {
            delta_time
        };
        self.state.elapsed_total =
            (self.state.elapsed_total + step).clamp(0.0, timing.total_duration);

        // Ran off the end of a finite animation
        if !self.state.reversed && self.state.elapsed_total >= timing.total_duration {
            let last = if def.ping_pong { 0 } else { timing.last_frame() };
            self.enter_frame(&def, last);
            self.state.playing = false;
            log::debug!("'{}' finished", def.name);
            return;
        }

        let iteration = timing.iteration_duration;
        let completed = (self.state.elapsed_total / iteration).floor() as u64;
        let returning =
            def.ping_pong && (def.looping || completed < 2) && completed % 2 == 1;

        let mut elapsed_time = if self.state.elapsed_total < iteration {
            self.state.elapsed_total
        } else {
            self.state.elapsed_total % iteration
        };

        if self.state.reversed && self.state.elapsed_total <= 0.0 {
            self.state.reversed = false;
            if def.looping {
                self.state.elapsed_total = 0.0;
            } else {
                self.enter_frame(&def, 0);
                self.state.playing = false;
                log::debug!("'{}' reversed back to its first frame", def.name);
                return;
            }
        }

        if returning {
            elapsed_time = iteration - elapsed_time;
        }

        // Floored position. When the tick does not divide the frame duration
        // evenly (or rounding lands just under a boundary, as with 0.3 / 0.1),
        // a frame may be held one tick longer or shorter than its neighbours.
        let desired =
            ((elapsed_time / timing.seconds_per_frame).floor() as usize).min(timing.last_frame());

        if self.enter_frame(&def, desired) && def.ping_pong && timing.is_boundary(desired) {
            // Turnaround frames would otherwise show for two frame durations
            let nudge = if self.state.reversed {
                -timing.seconds_per_frame
            } else {
                timing.seconds_per_frame
            };
            self.state.elapsed_total =
                (self.state.elapsed_total + nudge).clamp(0.0, timing.total_duration);
        }
    }

    /// Move to `frame` if it differs from the current one: display it and
    /// fire its triggers. Returns whether the frame changed.
    fn enter_frame(&mut self, def: &AnimationDef, frame: usize) -> bool {
        if frame == self.state.current_frame {
            return false;
        }
        self.state.current_frame = frame;
        self.observer.set_displayed_frame(def.frames.get(frame));
        for trigger in def.triggers_at(frame) {
            trigger.invoke(frame);
            self.observer.trigger_fired(trigger, frame);
        }
        true
    }

    /// Freeze playback without touching the accumulator.
    pub fn pause(&mut self) {
        self.state.playing = false;
    }

    /// Resume from exactly where `pause` left off.
    pub fn unpause(&mut self) {
        self.state.playing = true;
    }

    /// Toggle playback direction.
    pub fn reverse(&mut self) {
        self.state.reversed = !self.state.reversed;
    }

    /// Stop playback, clear the displayed frame and forget the current
    /// animation. A new `play` is required to resume.
    pub fn stop(&mut self) {
        if let Some(active) = &self.state.active {
            log::debug!("Stopping '{}'", active.def.name);
        }
        self.state = PlaybackState::default();
        self.observer.set_displayed_frame(None);
    }

    /// Called when the owning entity becomes inactive. Like `stop`, but the
    /// displayed frame is left as is.
    pub fn disable(&mut self) {
        self.state = PlaybackState::default();
    }

    /// Whether `name` is the current animation, paused or not.
    pub fn is_animation_playing(&self, name: &str) -> bool {
        self.state
            .active
            .as_ref()
            .is_some_and(|active| active.def.name == name)
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing
    }

    pub fn current_frame(&self) -> usize {
        self.state.current_frame
    }

    pub fn is_reversed(&self) -> bool {
        self.state.reversed
    }

    /// Accumulated animation time in seconds
    pub fn elapsed(&self) -> f64 {
        self.state.elapsed_total
    }

    pub fn current_animation(&self) -> Option<&AnimationDef> {
        self.state.active.as_ref().map(|active| active.def.as_ref())
    }

    /// Timing prepared for the current session
    pub fn timing(&self) -> Option<DerivedTiming> {
        self.state.active.as_ref().map(|active| active.timing)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
