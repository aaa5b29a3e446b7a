//! Frame-change observers: how a clock reaches the renderer and game logic

use crate::clip::{FrameTrigger, SpriteFrame};

/// Receives display updates and trigger notifications from an `AnimationClock`.
///
/// `set_displayed_frame(None)` clears the displayed image (sent by `stop`).
pub trait FrameObserver {
    fn set_displayed_frame(&mut self, frame: Option<&SpriteFrame>);

    /// Called after a trigger's own callback has run.
    fn trigger_fired(&mut self, _trigger: &FrameTrigger, _frame: usize) {}
}

impl<F> FrameObserver for F
where
    F: FnMut(Option<&SpriteFrame>),
{
    fn set_displayed_frame(&mut self, frame: Option<&SpriteFrame>) {
        self(frame)
    }
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl FrameObserver for NullObserver {
    fn set_displayed_frame(&mut self, _frame: Option<&SpriteFrame>) {}
}

/// One notification received by a [`FrameLog`]
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    Displayed(Option<SpriteFrame>),
    Trigger { name: String, frame: usize },
}

/// Observer that records every notification in order
#[derive(Debug, Default, Clone)]
pub struct FrameLog {
    events: Vec<FrameEvent>,
}

impl FrameLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[FrameEvent] {
        &self.events
    }

    /// Drain all recorded events
    pub fn drain(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Textures passed to `set_displayed_frame`, `None` for clears
    pub fn displayed(&self) -> Vec<Option<&str>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                FrameEvent::Displayed(frame) => Some(frame.as_ref().map(|f| f.texture.as_str())),
                FrameEvent::Trigger { .. } => None,
            })
            .collect()
    }

    /// Names of fired triggers
    pub fn triggers(&self) -> Vec<(&str, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                FrameEvent::Trigger { name, frame } => Some((name.as_str(), *frame)),
                FrameEvent::Displayed(_) => None,
            })
            .collect()
    }
}

impl FrameObserver for FrameLog {
    fn set_displayed_frame(&mut self, frame: Option<&SpriteFrame>) {
        self.events.push(FrameEvent::Displayed(frame.cloned()));
    }

    fn trigger_fired(&mut self, trigger: &FrameTrigger, frame: usize) {
        self.events.push(FrameEvent::Trigger {
            name: trigger.name.clone(),
            frame,
        });
    }
}
